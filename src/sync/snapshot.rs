//! Snapshots of the last imported and exported CSV files.
//!
//! Each operation kind owns one fixed slot. A slot is replaced atomically, so
//! it always holds either the previous complete file or the new complete file.
//! The import slot drives change detection; both slots double as a recovery
//! copy of the most recent guest list.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::SyncPaths;
use crate::sync::file::atomic_copy;
use crate::sync::hash::fingerprint_file;
use crate::sync::types::{OperationKind, SnapshotInfo, SyncError, SyncResult};

/// Fixed-location snapshot slots for import and export.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    import_path: PathBuf,
    export_path: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store using the configured snapshot locations.
    #[must_use]
    pub fn new(paths: &SyncPaths) -> Self {
        Self {
            import_path: paths.snapshot(OperationKind::Import).to_path_buf(),
            export_path: paths.snapshot(OperationKind::Export).to_path_buf(),
        }
    }

    /// The fixed location of a slot. The file may not exist.
    #[must_use]
    pub fn snapshot_path(&self, kind: OperationKind) -> &Path {
        match kind {
            OperationKind::Import => &self.import_path,
            OperationKind::Export => &self.export_path,
        }
    }

    /// Replace the `kind` slot with a copy of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read or the slot cannot be written.
    pub fn record_snapshot(&self, kind: OperationKind, source: &Path) -> SyncResult<()> {
        let dest = self.snapshot_path(kind);
        let bytes = atomic_copy(source, dest)?;
        info!(
            %kind,
            source = %source.display(),
            snapshot = %dest.display(),
            bytes,
            "Snapshot recorded"
        );
        Ok(())
    }

    /// Fingerprint of the `kind` slot, or `None` if nothing was recorded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub fn fingerprint(&self, kind: OperationKind) -> SyncResult<Option<String>> {
        let path = self.snapshot_path(kind);
        if !path.exists() {
            debug!(%kind, path = %path.display(), "No snapshot recorded");
            return Ok(None);
        }
        fingerprint_file(path).map(Some)
    }

    /// Size, fingerprint and modification time of the `kind` slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub fn info(&self, kind: OperationKind) -> SyncResult<Option<SnapshotInfo>> {
        let path = self.snapshot_path(kind);
        let Some(fingerprint) = self.fingerprint(kind)? else {
            return Ok(None);
        };
        let metadata = fs::metadata(path).map_err(|e| SyncError::io(path, e))?;

        Ok(Some(SnapshotInfo {
            kind,
            path: path.to_path_buf(),
            size: metadata.len(),
            fingerprint,
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        }))
    }

    /// Copy the `kind` slot out to `dest`, replacing `dest` atomically.
    ///
    /// Returns the number of bytes restored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SnapshotNotFound`] if the slot is empty, or an IO
    /// error if the copy fails.
    pub fn restore(&self, kind: OperationKind, dest: &Path) -> SyncResult<u64> {
        let path = self.snapshot_path(kind);
        if !path.exists() {
            return Err(SyncError::SnapshotNotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        let bytes = atomic_copy(path, dest)?;
        info!(%kind, dest = %dest.display(), bytes, "Snapshot restored");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> SnapshotStore {
        SnapshotStore::new(&SyncPaths::under(temp_dir.path()))
    }

    #[test]
    fn test_slots_are_distinct() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert_ne!(
            store.snapshot_path(OperationKind::Import),
            store.snapshot_path(OperationKind::Export)
        );
    }

    #[test]
    fn test_record_and_fingerprint() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let source = temp_dir.path().join("guests.csv");
        fs::write(&source, "Asha,,2,,,,,,\n").unwrap();

        assert!(store.fingerprint(OperationKind::Import).unwrap().is_none());

        store.record_snapshot(OperationKind::Import, &source).unwrap();

        assert_eq!(
            fs::read(store.snapshot_path(OperationKind::Import)).unwrap(),
            fs::read(&source).unwrap()
        );
        assert_eq!(
            store.fingerprint(OperationKind::Import).unwrap(),
            Some(fingerprint_file(&source).unwrap())
        );
        // The other slot is untouched
        assert!(store.fingerprint(OperationKind::Export).unwrap().is_none());
    }

    #[test]
    fn test_record_overwrites_previous() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let first = temp_dir.path().join("first.csv");
        let second = temp_dir.path().join("second.csv");
        fs::write(&first, "first\n").unwrap();
        fs::write(&second, "second\n").unwrap();

        store.record_snapshot(OperationKind::Export, &first).unwrap();
        store.record_snapshot(OperationKind::Export, &second).unwrap();

        assert_eq!(
            fs::read_to_string(store.snapshot_path(OperationKind::Export)).unwrap(),
            "second\n"
        );
    }

    #[test]
    fn test_info() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let source = temp_dir.path().join("guests.csv");
        fs::write(&source, "abc").unwrap();

        assert!(store.info(OperationKind::Import).unwrap().is_none());
        store.record_snapshot(OperationKind::Import, &source).unwrap();

        let info = store.info(OperationKind::Import).unwrap().unwrap();
        assert_eq!(info.kind, OperationKind::Import);
        assert_eq!(info.size, 3);
        assert_eq!(info.fingerprint.len(), 64);
    }

    #[test]
    fn test_restore() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let source = temp_dir.path().join("guests.csv");
        let dest = temp_dir.path().join("recovered").join("guests.csv");
        fs::write(&source, "Asha,,2,,,,,,\n").unwrap();

        let missing = store.restore(OperationKind::Import, &dest);
        assert!(matches!(missing, Err(SyncError::SnapshotNotFound { .. })));

        store.record_snapshot(OperationKind::Import, &source).unwrap();
        store.restore(OperationKind::Import, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), fs::read(&source).unwrap());
    }
}
