//! Command-line flags and the optional YAML configuration file

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::generator::openapi_gen::DEFAULT_GENERATOR;
use crate::orchestrator::IgnoreMode;
use crate::{Error, Result};

/// Generate OpenAPI validation definitions and scaffold CRD manifests
#[derive(Debug, Default, Parser)]
#[command(name = "crd-openapi-gen", version, about)]
pub struct CliArgs {
    /// Project root containing pkg/apis and deploy/crds (default: current directory)
    #[arg(long, env = "CRD_OPENAPI_GEN_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Module root import path (default: project directory name)
    #[arg(long)]
    pub repo: Option<String>,

    /// openapi-gen executable
    #[arg(long, env = "CRD_OPENAPI_GEN_GENERATOR")]
    pub generator: Option<PathBuf>,

    /// API group to leave out of scaffolding (repeatable)
    #[arg(long = "ignore-group", value_name = "GROUP")]
    pub ignore_groups: Vec<String>,

    /// Scaffold each CRD at most once, skipping any whose group is ignored
    #[arg(long)]
    pub exclude_by_set: bool,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    pub log_json: bool,
}

/// Contents of the YAML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    pub project_root: Option<PathBuf>,
    pub repo: Option<String>,
    pub generator: Option<PathBuf>,
    #[serde(default)]
    pub ignore_groups: Vec<String>,
    #[serde(default)]
    pub exclude_by_set: bool,
}

/// Resolved settings for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub project_root: PathBuf,
    pub repo: Option<String>,
    pub generator: PathBuf,
    /// `None` runs without a group filter
    pub ignore_groups: Option<Vec<String>>,
    pub ignore_mode: IgnoreMode,
}

impl RunConfig {
    /// Merge flags over the config file; flags win
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => load_config_file(path)?,
            None => FileConfig::default(),
        };

        let project_root = args
            .project_root
            .or(file.project_root)
            .unwrap_or_else(|| PathBuf::from("."));

        let ignore_groups = if !args.ignore_groups.is_empty() {
            Some(args.ignore_groups)
        } else if !file.ignore_groups.is_empty() {
            Some(file.ignore_groups)
        } else {
            None
        };

        let ignore_mode = if args.exclude_by_set || file.exclude_by_set {
            IgnoreMode::Exclude
        } else {
            IgnoreMode::PerEntry
        };

        Ok(Self {
            project_root,
            repo: args.repo.or(file.repo),
            generator: args
                .generator
                .or(file.generator)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GENERATOR)),
            ignore_groups,
            ignore_mode,
        })
    }
}

fn load_config_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;

    serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}
