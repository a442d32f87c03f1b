//! Sync status display.
//!
//! This module reports the state of the store and both snapshot slots, and
//! optionally whether importing a given file would be skipped.

use std::path::Path;

use colored::Colorize;

use crate::sync::engine::SyncEngine;
use crate::sync::hash::fingerprint_file;
use crate::sync::types::{
    CandidateStatus, OperationKind, SnapshotInfo, SyncError, SyncResult, SyncStatus,
};

impl SyncEngine {
    /// Get the current sync status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or a snapshot exists but cannot be read,
    /// or if `candidate` cannot be fingerprinted.
    pub fn status(&self, candidate: Option<&Path>) -> SyncResult<SyncStatus> {
        let store_exists = self.store_exists();
        let invitees = if store_exists {
            match self.open_existing_store() {
                Ok(store) => Some(store.count_invitees()?),
                Err(SyncError::StoreNotFound { .. }) => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let candidate = match candidate {
            Some(path) => {
                let fingerprint = fingerprint_file(path)?;
                let matches_last_import = store_exists && self.matches_last_import(&fingerprint);
                Some(CandidateStatus {
                    path: path.to_path_buf(),
                    fingerprint,
                    matches_last_import,
                })
            }
            None => None,
        };

        Ok(SyncStatus {
            store_path: self.paths.store.clone(),
            store_exists,
            invitees,
            import_snapshot: self.snapshots.info(OperationKind::Import)?,
            export_snapshot: self.snapshots.info(OperationKind::Export)?,
            candidate,
        })
    }
}

/// Print sync status to stdout in a human-readable format.
pub fn print_status(status: &SyncStatus) {
    println!("{}", "Sync Status".bold().underline());
    println!();

    println!("{}", "Store:".blue().bold());
    println!("  Location: {}", status.store_path.display());
    if status.store_exists {
        match status.invitees {
            Some(count) => println!("  Invitees: {count}"),
            None => println!("  {}", "Store exists but holds no invitee table.".yellow()),
        }
    } else {
        println!("  {}", "Not created yet.".dimmed());
        println!(
            "{}",
            "  Run 'shaadi import <file>' to create it from a guest list.".dimmed()
        );
    }
    println!();

    print_snapshot("Last Import:", status.import_snapshot.as_ref());
    print_snapshot("Last Export:", status.export_snapshot.as_ref());

    if let Some(candidate) = &status.candidate {
        println!("{}", "Candidate:".blue().bold());
        println!("  File:        {}", candidate.path.display());
        println!("  Fingerprint: {}", short_fingerprint(&candidate.fingerprint));
        if candidate.matches_last_import {
            println!("  {}", "Identical to the last import; import would be skipped.".green());
        } else {
            println!("  {}", "Differs from the last import; import would insert rows.".yellow());
        }
    }
}

fn print_snapshot(title: &str, info: Option<&SnapshotInfo>) {
    println!("{}", title.blue().bold());
    match info {
        Some(info) => {
            println!("  Snapshot:    {}", info.path.display());
            println!("  Size:        {}", format_size(info.size));
            println!("  Fingerprint: {}", short_fingerprint(&info.fingerprint));
            if let Some(modified) = info.modified {
                println!("  Recorded:    {}", modified.to_rfc3339());
            }
        }
        None => println!("  {}", "None recorded.".dimmed()),
    }
    println!();
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

/// Format a byte size as a human-readable string.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncPaths;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let engine = SyncEngine::new(SyncPaths::under(temp_dir.path()));

        let status = engine.status(None).unwrap();

        assert!(!status.store_exists);
        assert!(status.invitees.is_none());
        assert!(status.import_snapshot.is_none());
        assert!(status.export_snapshot.is_none());
        assert!(status.candidate.is_none());
    }

    #[test]
    fn test_status_after_import_and_export() {
        let temp_dir = TempDir::new().unwrap();
        let engine = SyncEngine::new(SyncPaths::under(&temp_dir.path().join("artifacts")));
        let input = temp_dir.path().join("guests.csv");
        let output = temp_dir.path().join("out.csv");
        fs::write(&input, "Asha,,2,,,,,,\n").unwrap();

        engine.import(&input).unwrap();
        engine.export(&output).unwrap();
        let status = engine.status(Some(&input)).unwrap();

        assert!(status.store_exists);
        assert_eq!(status.invitees, Some(1));
        assert_eq!(status.import_snapshot.unwrap().size, 14);
        assert!(status.export_snapshot.is_some());
        assert!(status.candidate.unwrap().matches_last_import);
    }

    #[test]
    fn test_status_candidate_differs() {
        let temp_dir = TempDir::new().unwrap();
        let engine = SyncEngine::new(SyncPaths::under(&temp_dir.path().join("artifacts")));
        let input = temp_dir.path().join("guests.csv");
        let other = temp_dir.path().join("other.csv");
        fs::write(&input, "Asha,,2,,,,,,\n").unwrap();
        fs::write(&other, "Ravi,,1,,,,,,\n").unwrap();

        engine.import(&input).unwrap();
        let status = engine.status(Some(&other)).unwrap();

        assert!(!status.candidate.unwrap().matches_last_import);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_short_fingerprint() {
        assert_eq!(short_fingerprint("abcdef0123456789"), "abcdef012345");
        assert_eq!(short_fingerprint("abc"), "abc");
    }
}
