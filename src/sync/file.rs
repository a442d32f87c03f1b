//! Atomic file operations for sync.
//!
//! This module provides safe file operations that prevent torn snapshots:
//! - Atomic copies: copy to a sibling temp file, sync to disk, then rename
//! - Parent directory creation for store and CSV targets

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::sync::types::{SyncError, SyncResult};

/// Create the parent directory of `path` if it has one and it is missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Sibling temp path used while a file is being replaced (`x.csv` → `x.csv.tmp`).
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("snapshot"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Copy `src` over `dest` atomically.
///
/// This function:
/// 1. Copies the content into a temporary file next to `dest`
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to `dest`
///
/// If any step fails, the previous `dest` (if any) remains untouched and the
/// temp file is removed. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_copy(src: &Path, dest: &Path) -> SyncResult<u64> {
    ensure_parent_dir(dest)?;
    let temp_path = temp_path_for(dest);

    let result = write_temp_copy(src, &temp_path).and_then(|bytes| {
        fs::rename(&temp_path, dest).map_err(|e| SyncError::io(dest, e))?;
        Ok(bytes)
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp_copy(src: &Path, temp_path: &Path) -> SyncResult<u64> {
    let source = File::open(src).map_err(|e| SyncError::io(src, e))?;
    let mut reader = BufReader::new(source);

    let file = File::create(temp_path).map_err(|e| SyncError::io(temp_path, e))?;
    let mut writer = BufWriter::new(file);
    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| SyncError::io(src, e))?;
    writer.flush().map_err(|e| SyncError::io(temp_path, e))?;
    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SyncError::io(temp_path, e))?;

    Ok(bytes)
}
