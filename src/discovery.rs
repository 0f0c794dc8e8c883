//! Discovery of API groups and versions in the project source tree

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// API group name to the versions present under it
pub type GroupVersionMap = BTreeMap<String, BTreeSet<String>>;

/// Walk `apis/<group>/<version>` and collect every group/version pair
///
/// Version directories without any regular file are skipped so the generator
/// is never handed an empty package.
pub fn discover_group_versions(apis_dir: &Path) -> Result<GroupVersionMap> {
    let mut gv_map = GroupVersionMap::new();

    for group in read_subdirs(apis_dir)? {
        let group_dir = apis_dir.join(&group);
        for version in read_subdirs(&group_dir)? {
            let version_dir = group_dir.join(&version);
            if has_regular_file(&version_dir)? {
                gv_map.entry(group.clone()).or_default().insert(version);
            } else {
                debug!("Skipping empty version directory {}", version_dir.display());
            }
        }
    }

    if gv_map.is_empty() {
        return Err(Error::Discovery {
            path: apis_dir.to_path_buf(),
            message: "no groups or versions found".to_string(),
        });
    }

    Ok(gv_map)
}

/// Render the map as `group:[v1 v2], ` for log output
pub fn describe(gv_map: &GroupVersionMap) -> String {
    gv_map
        .iter()
        .map(|(group, versions)| {
            let versions: Vec<&str> = versions.iter().map(String::as_str).collect();
            format!("{}:[{}], ", group, versions.join(" "))
        })
        .collect()
}

fn read_subdirs(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| discovery_error(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| discovery_error(dir, e))?;
        let file_type = entry.file_type().map_err(|e| discovery_error(dir, e))?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

fn has_regular_file(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| discovery_error(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| discovery_error(dir, e))?;
        if entry
            .file_type()
            .map_err(|e| discovery_error(dir, e))?
            .is_file()
        {
            return Ok(true);
        }
    }

    Ok(false)
}

fn discovery_error(dir: &Path, err: std::io::Error) -> Error {
    Error::Discovery {
        path: dir.to_path_buf(),
        message: err.to_string(),
    }
}
