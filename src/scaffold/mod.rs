//! Scaffolding of supporting files for enumerated CRDs

mod resource;

pub use resource::Resource;

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use crate::adapters::crd_builder;
use crate::crd::{crd_files, CrdDescriptor, CRD_FILE_SUFFIX};
use crate::project::{ProjectConfig, CRDS_DIR};
use crate::{Error, Result};

/// Scaffolding engine collaborator
pub trait Scaffolder {
    /// Write the supporting files of `resource` into the project
    fn materialize(&self, config: &ProjectConfig, resource: &Resource) -> Result<()>;
}

impl<S: Scaffolder + ?Sized> Scaffolder for &S {
    fn materialize(&self, config: &ProjectConfig, resource: &Resource) -> Result<()> {
        (**self).materialize(config, resource)
    }
}

/// Build the resource identity of a descriptor and scaffold it
pub fn scaffold_crd<S: Scaffolder>(
    descriptor: &CrdDescriptor,
    config: &ProjectConfig,
    scaffolder: &S,
) -> Result<()> {
    let resource = Resource::new(&descriptor.api_version(), &descriptor.kind)?;
    debug!("Scaffolding {}", descriptor);
    scaffolder.materialize(config, &resource)
}

/// Keeps the CRD manifest of a resource in `deploy/crds` up to date
///
/// A manifest already declaring the resource's group and kind is updated in
/// place, gaining only a missing version. Otherwise a new manifest is written.
#[derive(Clone, Debug, Default)]
pub struct CrdManifestScaffolder;

impl CrdManifestScaffolder {
    /// `deploy/crds/<shortgroup>_<version>_<lowerkind>_crd.yaml`, used for new manifests
    pub fn manifest_path(config: &ProjectConfig, resource: &Resource) -> PathBuf {
        config.abs_project_path.join(CRDS_DIR).join(format!(
            "{}_{}_{}{}",
            resource.short_group,
            resource.version(),
            resource.lower_kind,
            CRD_FILE_SUFFIX
        ))
    }

    /// Existing manifest declaring the group and kind of `resource`
    ///
    /// A manifest already listing the resource's version wins over one that
    /// does not.
    fn find_manifest(dir: &Path, resource: &Resource) -> Result<Option<(PathBuf, Value)>> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut fallback = None;
        for path in crd_files(dir)? {
            let contents = fs::read_to_string(&path).map_err(|source| Error::DirectoryRead {
                path: path.clone(),
                source,
            })?;
            let manifest: Value =
                serde_yaml::from_str(&contents).map_err(|source| Error::ManifestParse {
                    path: path.clone(),
                    source,
                })?;

            if !crd_builder::declares(&manifest, resource) {
                continue;
            }

            if crd_builder::lists_version(&manifest, resource) {
                return Ok(Some((path, manifest)));
            }
            if fallback.is_none() {
                fallback = Some((path, manifest));
            }
        }

        Ok(fallback)
    }
}

impl Scaffolder for CrdManifestScaffolder {
    fn materialize(&self, config: &ProjectConfig, resource: &Resource) -> Result<()> {
        let dir = config.abs_project_path.join(CRDS_DIR);

        if let Some((path, mut manifest)) = Self::find_manifest(&dir, resource)? {
            let changed = crd_builder::add_version(&mut manifest, resource)
                .map_err(|message| write_error(&path, message))?;
            if !changed {
                debug!(
                    "CRD manifest {} already declares {}",
                    path.display(),
                    resource.version()
                );
                return Ok(());
            }

            let yaml = serde_yaml::to_string(&manifest)
                .map_err(|e| write_error(&path, format!("failed to serialize CRD: {}", e)))?;
            fs::write(&path, yaml).map_err(|e| write_error(&path, e.to_string()))?;

            info!(
                "Added version {} to CRD manifest {}",
                resource.version(),
                path.display()
            );
            return Ok(());
        }

        let path = Self::manifest_path(config, resource);
        let crd = crd_builder::build_crd(resource);
        let yaml = serde_yaml::to_string(&crd)
            .map_err(|e| write_error(&path, format!("failed to serialize CRD: {}", e)))?;

        fs::create_dir_all(&dir).map_err(|e| write_error(&path, e.to_string()))?;
        fs::write(&path, yaml).map_err(|e| write_error(&path, e.to_string()))?;

        info!("Wrote CRD manifest {}", path.display());

        Ok(())
    }
}

fn write_error(path: &Path, message: String) -> Error {
    Error::ScaffoldWrite {
        path: path.to_path_buf(),
        message,
    }
}
