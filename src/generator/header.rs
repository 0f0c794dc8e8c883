//! Header template for generated files

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::project::ProjectRoot;
use crate::{Error, Result};

/// Run `f` with the path of the header template
///
/// The project boilerplate is used when present. Otherwise an empty
/// temporary file stands in and is removed once `f` returns.
pub fn with_header_file<T>(root: &ProjectRoot, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    let boilerplate = root.boilerplate_file();
    if boilerplate.is_file() {
        debug!("Using header file {}", boilerplate.display());
        return f(&boilerplate);
    }

    let empty = NamedTempFile::new().map_err(Error::HeaderFile)?;
    debug!(
        "No boilerplate at {}, using empty header {}",
        boilerplate.display(),
        empty.path().display()
    );

    f(empty.path())
}
