//! Project root and layout of an operator project

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// API source tree, relative to the project root
pub const APIS_DIR: &str = "pkg/apis";

/// CRD manifest directory, relative to the project root
pub const CRDS_DIR: &str = "deploy/crds";

/// Project boilerplate used as the generated-file header
pub const BOILERPLATE_FILE: &str = "hack/boilerplate.go.txt";

/// Root directory of the operator project being generated
///
/// Every component joins its paths onto this value instead of the process
/// working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Create a project root, resolving it to an absolute path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let abs = std::path::absolute(path).map_err(|e| {
            Error::Config(format!(
                "cannot resolve project root {}: {}",
                path.display(),
                e
            ))
        })?;
        let abs = normalize(&abs);

        if !abs.is_dir() {
            return Err(Error::Config(format!(
                "project root {} is not a directory",
                abs.display()
            )));
        }

        Ok(Self(abs))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.0.join(rel)
    }

    pub fn apis_dir(&self) -> PathBuf {
        self.join(APIS_DIR)
    }

    pub fn crds_dir(&self) -> PathBuf {
        self.join(CRDS_DIR)
    }

    pub fn boilerplate_file(&self) -> PathBuf {
        self.join(BOILERPLATE_FILE)
    }

    /// Final path component, used as the project name
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Drop `.` and resolve `..` components lexically
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Project settings handed to the scaffolder with every resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Module root import path, e.g. `github.com/example/app-operator`
    pub repo: String,
    /// Absolute project path
    pub abs_project_path: PathBuf,
    /// Project name
    pub project_name: String,
}

impl ProjectConfig {
    /// Build the configuration for a project root
    ///
    /// Without an explicit repo the project name doubles as the module root.
    pub fn new(root: &ProjectRoot, repo: Option<String>) -> Self {
        let project_name = root.name();
        Self {
            repo: repo.unwrap_or_else(|| project_name.clone()),
            abs_project_path: root.path().to_path_buf(),
            project_name,
        }
    }
}
