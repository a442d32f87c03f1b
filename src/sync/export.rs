//! CSV export.
//!
//! Export appends every stored invitee, `id` first, to the target CSV and
//! then records the target as the export snapshot. It never creates a store.

use std::path::Path;

use tracing::info;

use crate::sync::engine::SyncEngine;
use crate::sync::hash::fingerprint_file;
use crate::sync::mapper::to_tabular_row;
use crate::sync::tabular::TabularWriter;
use crate::sync::types::{ExportStats, OperationKind, SyncResult};

impl SyncEngine {
    /// Export the store to a CSV file.
    ///
    /// Rows are appended in id order; the target and its parent directories
    /// are created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::sync::SyncError::StoreNotFound`] if no store exists,
    /// a storage error if the query fails, and an IO error if the target or
    /// the snapshot cannot be written.
    pub fn export(&self, path: &Path) -> SyncResult<ExportStats> {
        info!(path = %path.display(), "Exporting guest list");

        let invitees = {
            let store = self.open_existing_store()?;
            store.list_invitees()?
        };

        let mut writer = TabularWriter::append(path)?;
        for invitee in &invitees {
            writer.write_row(to_tabular_row(invitee))?;
        }
        let rows = writer.finish()?;
        info!(rows, path = %path.display(), "Rows exported");

        self.snapshots.record_snapshot(OperationKind::Export, path)?;

        Ok(ExportStats {
            rows,
            path: path.to_path_buf(),
            fingerprint: fingerprint_file(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncPaths;
    use crate::sync::tabular::read_rows;
    use crate::sync::types::SyncError;
    use std::fs;
    use tempfile::TempDir;

    const GUESTS: &str = "Asha,Smt. Asha Rao,2,98100,\"12, MG Road\",mehendi|sangeet,family,,\n\
                          Ravi,,1,,,haldi,,,veg only\n\
                          Zoya,,03,,,,,shawl,\n";

    fn engine_in(temp_dir: &TempDir) -> SyncEngine {
        SyncEngine::new(SyncPaths::under(&temp_dir.path().join("artifacts")))
    }

    #[test]
    fn test_export_without_store() {
        let temp_dir = TempDir::new().unwrap();
        let engine = engine_in(&temp_dir);
        let target = temp_dir.path().join("out.csv");

        let result = engine.export(&target);

        assert!(matches!(result, Err(SyncError::StoreNotFound { .. })));
        assert!(!engine.store_exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let engine = engine_in(&temp_dir);
        let input = temp_dir.path().join("guests.csv");
        let output = temp_dir.path().join("exports").join("guests-out.csv");
        fs::write(&input, GUESTS).unwrap();

        engine.import(&input).unwrap();
        let stats = engine.export(&output).unwrap();

        assert_eq!(stats.rows, 3);
        let imported = read_rows(&input).unwrap();
        let exported = read_rows(&output).unwrap();
        assert_eq!(exported.len(), imported.len());
        for (idx, (out_row, in_row)) in exported.iter().zip(&imported).enumerate() {
            assert_eq!(out_row[0], (idx + 1).to_string());
            assert_eq!(&out_row[1..], &in_row[..]);
        }
    }

    #[test]
    fn test_export_appends() {
        let temp_dir = TempDir::new().unwrap();
        let engine = engine_in(&temp_dir);
        let input = temp_dir.path().join("guests.csv");
        let output = temp_dir.path().join("out.csv");
        fs::write(&input, GUESTS).unwrap();
        fs::write(&output, "existing,line\n").unwrap();

        engine.import(&input).unwrap();
        engine.export(&output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("existing,line\n1,Asha,"));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_export_snapshot_matches_output() {
        let temp_dir = TempDir::new().unwrap();
        let engine = engine_in(&temp_dir);
        let input = temp_dir.path().join("guests.csv");
        let output = temp_dir.path().join("out.csv");
        fs::write(&input, GUESTS).unwrap();

        engine.import(&input).unwrap();
        let stats = engine.export(&output).unwrap();

        let snapshot = engine.snapshots().snapshot_path(OperationKind::Export);
        assert_eq!(fs::read(snapshot).unwrap(), fs::read(&output).unwrap());
        assert_eq!(stats.fingerprint, fingerprint_file(snapshot).unwrap());
    }

    #[test]
    fn test_export_empty_store_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let engine = engine_in(&temp_dir);
        let input = temp_dir.path().join("empty.csv");
        let output = temp_dir.path().join("out.csv");
        fs::write(&input, "").unwrap();

        engine.import(&input).unwrap();
        let stats = engine.export(&output).unwrap();

        assert_eq!(stats.rows, 0);
        assert_eq!(fs::read(&output).unwrap(), Vec::<u8>::new());
    }
}
