//! CRD manifest loading and group/version/kind enumeration

mod manifest;

pub use manifest::*;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

/// File name suffix of CRD manifests
pub const CRD_FILE_SUFFIX: &str = "_crd.yaml";

/// Group, version and kind of one custom resource
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrdDescriptor {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl CrdDescriptor {
    /// Resolve the descriptor of a manifest
    ///
    /// The primary version wins; otherwise the first declared version is
    /// used. A manifest with neither is rejected.
    pub fn from_manifest(manifest: &CrdManifest) -> Result<Self> {
        let spec = &manifest.spec;

        let version = match spec.version.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => spec
                .versions
                .first()
                .map(|v| v.name.clone())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::MissingVersion {
                    group: spec.group.clone(),
                    kind: spec.names.kind.clone(),
                })?,
        };

        Ok(Self {
            group: spec.group.clone(),
            version,
            kind: spec.names.kind.clone(),
        })
    }

    /// `group/version`
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

impl fmt::Display for CrdDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// Paths of every `*_crd.yaml` file in `dir`, in file name order
pub fn crd_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_crd = path
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(CRD_FILE_SUFFIX))
            .unwrap_or(false);
        if is_crd && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

/// Load every `*_crd.yaml` manifest in `dir`, in file name order
pub fn load_crds(dir: &Path) -> Result<Vec<(PathBuf, CrdManifest)>> {
    let paths = crd_files(dir)?;

    let mut crds = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path).map_err(|source| Error::DirectoryRead {
            path: path.clone(),
            source,
        })?;
        let manifest: CrdManifest =
            serde_yaml::from_str(&contents).map_err(|source| Error::ManifestParse {
                path: path.clone(),
                source,
            })?;
        crds.push((path, manifest));
    }

    Ok(crds)
}

/// Enumerate the group/version/kind of every CRD manifest in `dir`
///
/// All manifests are resolved before anything is returned, so a bad manifest
/// fails the enumeration as a whole.
pub fn enumerate_crds(dir: &Path) -> Result<Vec<CrdDescriptor>> {
    load_crds(dir)?
        .iter()
        .map(|(path, manifest)| -> Result<CrdDescriptor> {
            let descriptor = CrdDescriptor::from_manifest(manifest)?;
            debug!("Found CRD {} in {}", descriptor, path.display());
            Ok(descriptor)
        })
        .collect()
}
