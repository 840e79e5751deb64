//! Atomic File Writes - tmp + rename
//!
//! Output files are written to a sibling `*.tmp` file first and then
//! renamed over the final path, so a reader never observes a partially
//! written sheet or report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Write `bytes` to `path` atomically, creating parent directories.
///
/// # Errors
/// Directory creation, temp file write or rename failures.
#[instrument(skip(bytes), fields(path = %path.display(), bytes = bytes.len()))]
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp = tmp_path(path);

    fs::write(&tmp, bytes)
        .with_context(|| format!("Failed to write tmp file {}", tmp.display()))?;

    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to rename {} into place", tmp.display()))?;

    debug!("File written atomically");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
