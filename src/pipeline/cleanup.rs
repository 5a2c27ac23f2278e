//! Best-effort removal of tool droppings.
//!
//! The HEG tools litter their working directory with logs and scratch
//! files. Removal tolerates exactly one failure mode — the file already
//! being gone — and surfaces everything else (permissions, I/O), since a
//! file we cannot delete will silently poison later runs that reuse the
//! directory.

use crate::error::Hdf2TifError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Remove `path` if it exists; a missing file is not an error.
pub fn remove_if_exists(path: &Path) -> Result<(), Hdf2TifError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Hdf2TifError::CleanupFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove every file in `dir` whose name starts with `prefix`.
///
/// A missing or unreadable directory is treated as "nothing to remove".
pub fn remove_with_prefix(dir: &Path, prefix: &str) -> Result<(), Hdf2TifError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            remove_if_exists(&entry.path())?;
        }
    }
    Ok(())
}
