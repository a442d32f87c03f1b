//! Content fingerprinting for change detection.
//!
//! A fingerprint is the SHA256 digest of a file's full byte content, rendered
//! as 64 lowercase hex characters. Two files with the same bytes always share
//! a fingerprint, so comparing fingerprints tells us whether an import is
//! redundant without keeping the previous content in memory.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::sync::types::{SyncError, SyncResult};

/// Compute the fingerprint of a file.
///
/// The file is streamed through the hasher, so large guest lists are not
/// loaded into memory.
///
/// # Errors
///
/// Returns [`SyncError::Io`] if the file cannot be opened or read.
pub fn fingerprint_file(path: &Path) -> SyncResult<String> {
    let file = File::open(path).map_err(|e| SyncError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(|e| SyncError::io(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Check if content has changed since the stored fingerprint was taken.
///
/// Returns `true` if:
/// - There is no stored fingerprint (never imported)
/// - The current fingerprint differs from the stored one
#[must_use]
pub fn has_changed(current: &str, stored: Option<&str>) -> bool {
    stored.is_none_or(|s| s != current)
}
