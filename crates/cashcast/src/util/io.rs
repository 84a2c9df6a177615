//! I/O utility functions

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temp file next to `path`: `snapshot.json` becomes `snapshot.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("cashcast"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename.
///
/// The content is first written to a temporary file beside the target, then
/// renamed over it, so an interrupted write never leaves a truncated file.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}
