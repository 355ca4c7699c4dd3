use crate::constants;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scans the drop directory for a pending `.txt` file.
///
/// Returns the first match in directory-enumeration order. The order is
/// filesystem-dependent; when several files are pending, whichever comes
/// back first is consumed and the rest wait for the next scheduled run.
pub fn find_pending_file(drop_dir: &Path) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(drop_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext == constants::PENDING_FILE_EXT)
        {
            debug!("Found pending file: {}", path.display());
            return Ok(Some(path));
        }
    }
    Ok(None)
}
