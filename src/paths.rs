//! Resolution of group/version pairs into generator input packages

use std::fmt;
use std::path::PathBuf;

use crate::discovery::GroupVersionMap;
use crate::project::{ProjectRoot, APIS_DIR};
use crate::{Error, Result};

/// Fully-qualified package path of one group/version, e.g.
/// `github.com/example/app-operator/pkg/apis/cache/v1alpha1`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FqApiPath {
    path: String,
    /// Length of the module root prefix; the apis directory is searched after it
    repo_len: usize,
}

impl FqApiPath {
    /// Path with no known module root; the first apis directory match is used
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            repo_len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path of this package relative to the project root, as `./pkg/apis/<group>/<version>`
    ///
    /// The generator resolves input directories against its working
    /// directory, so it must be given the relative form.
    pub fn relative(&self) -> Result<String> {
        let start = self.path[self.repo_len..]
            .find(APIS_DIR)
            .map(|i| i + self.repo_len)
            .ok_or_else(|| Error::GeneratorValidation {
                api: self.path.clone(),
                message: format!("path does not contain the {} directory", APIS_DIR),
            })?;

        Ok(format!("./{}", &self.path[start..]))
    }

    /// Directory the generated file is written to
    pub fn output_package(&self, root: &ProjectRoot) -> Result<PathBuf> {
        let relative = self.relative()?;
        Ok(root.join(relative.trim_start_matches("./")))
    }
}

impl fmt::Display for FqApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Build one fully-qualified package path per group/version pair in the map
pub fn create_fq_apis(repo: &str, gv_map: &GroupVersionMap) -> Vec<FqApiPath> {
    let repo = join_import_path(&[repo]);
    let repo_len = repo.len();
    let apis_pkg = join_import_path(&[repo.as_str(), APIS_DIR]);

    gv_map
        .iter()
        .flat_map(|(group, versions)| {
            let apis_pkg = apis_pkg.as_str();
            let group = group.as_str();
            versions.iter().map(move |version| FqApiPath {
                path: join_import_path(&[apis_pkg, group, version.as_str()]),
                repo_len,
            })
        })
        .collect()
}

/// Join import path segments with `/`, dropping empty segments and stray slashes
fn join_import_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
