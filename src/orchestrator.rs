//! Top-level OpenAPI code-generation runs
//!
//! A run has two phases executed in order: OpenAPI generation for every API
//! package under `pkg/apis`, then scaffolding for every CRD manifest under
//! `deploy/crds`. The first error aborts the run.

use tracing::{info, instrument, warn};

use crate::crd::{enumerate_crds, CrdDescriptor};
use crate::discovery::{describe, discover_group_versions};
use crate::generator::{generate_openapi, with_header_file, SchemaGenerator};
use crate::paths::create_fq_apis;
use crate::project::{ProjectConfig, ProjectRoot};
use crate::scaffold::{scaffold_crd, Scaffolder};
use crate::Result;

/// How an ignore list filters scaffolded CRDs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IgnoreMode {
    /// Scaffold a CRD once for every ignore-list entry naming a different group.
    ///
    /// With `n` entries a CRD outside all of them is scaffolded `n` times, and
    /// an empty list scaffolds nothing.
    #[default]
    PerEntry,
    /// Scaffold a CRD once unless its group is in the ignore list
    Exclude,
}

/// Counts reported by a finished run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// API packages handed to the generator
    pub api_packages: usize,
    /// CRD manifests found
    pub crds: usize,
    /// Scaffold invocations
    pub scaffolded: usize,
}

/// Drives OpenAPI generation and CRD scaffolding for one project
pub struct OpenApiGen<G, S> {
    root: ProjectRoot,
    config: ProjectConfig,
    generator: G,
    scaffolder: S,
}

impl<G: SchemaGenerator, S: Scaffolder> OpenApiGen<G, S> {
    pub fn new(root: ProjectRoot, config: ProjectConfig, generator: G, scaffolder: S) -> Self {
        Self {
            root,
            config,
            generator,
            scaffolder,
        }
    }

    /// Generate OpenAPI definitions and scaffold every CRD once
    #[instrument(skip(self), fields(project = %self.config.project_name))]
    pub fn run(&self) -> Result<RunSummary> {
        let mut summary = self.generate_specs()?;

        let crds = enumerate_crds(&self.root.crds_dir())?;
        summary.crds = crds.len();

        for crd in &crds {
            scaffold_crd(crd, &self.config, &self.scaffolder)?;
            summary.scaffolded += 1;
        }

        info!("Code-generation complete.");
        Ok(summary)
    }

    /// Generate OpenAPI definitions and scaffold CRDs filtered by `ignore_groups`
    #[instrument(skip(self), fields(project = %self.config.project_name))]
    pub fn run_with_ignored_groups(
        &self,
        ignore_groups: &[String],
        mode: IgnoreMode,
    ) -> Result<RunSummary> {
        let mut summary = self.generate_specs()?;

        let crds = enumerate_crds(&self.root.crds_dir())?;
        summary.crds = crds.len();

        for crd in &crds {
            summary.scaffolded += match mode {
                IgnoreMode::PerEntry => self.scaffold_per_entry(crd, ignore_groups)?,
                IgnoreMode::Exclude => self.scaffold_unless_excluded(crd, ignore_groups)?,
            };
        }

        info!("Code-generation complete.");
        Ok(summary)
    }

    fn generate_specs(&self) -> Result<RunSummary> {
        let gv_map = discover_group_versions(&self.root.apis_dir())?;
        info!(
            "Running OpenAPI code-generation for Custom Resource group versions: [{}]",
            describe(&gv_map)
        );

        let fq_apis = create_fq_apis(&self.config.repo, &gv_map);
        with_header_file(&self.root, |header| {
            generate_openapi(&self.generator, &self.root, header, &fq_apis)
        })?;

        Ok(RunSummary {
            api_packages: fq_apis.len(),
            ..Default::default()
        })
    }

    fn scaffold_per_entry(&self, crd: &CrdDescriptor, ignore_groups: &[String]) -> Result<usize> {
        let mut count = 0;
        for group in ignore_groups {
            if crd.group != *group {
                scaffold_crd(crd, &self.config, &self.scaffolder)?;
                count += 1;
            }
        }

        if count > 1 {
            warn!(
                "CRD {} was scaffolded {} times, once per non-matching ignore entry; use set exclusion to scaffold it once",
                crd, count
            );
        }

        Ok(count)
    }

    fn scaffold_unless_excluded(
        &self,
        crd: &CrdDescriptor,
        ignore_groups: &[String],
    ) -> Result<usize> {
        if ignore_groups.iter().any(|g| *g == crd.group) {
            info!("Skipping CRD {} in ignored group", crd);
            return Ok(0);
        }

        scaffold_crd(crd, &self.config, &self.scaffolder)?;
        Ok(1)
    }
}
