//! Filesystem helpers for writing vault copies atomically.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A fresh temporary path next to `destination`, so the final rename never
/// crosses filesystems.
pub fn temp_sibling(destination: &Path) -> io::Result<PathBuf> {
    let parent = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid destination filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();
    Ok(parent.join(format!(".{}.{}.tmp", filename, nanos)))
}

/// Move a finished temp file over `destination`.
///
/// Some platforms refuse to rename onto an existing file; in that case the
/// destination is removed and the rename retried. The temp file is removed
/// if the move ultimately fails.
pub fn replace_file(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Replacing {} failed (initial: {}, retry: {})",
                    destination.display(),
                    initial_err,
                    retry_err
                ),
            )
        })?;
    }
    Ok(())
}
