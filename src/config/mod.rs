//! Configuration management.
//!
//! This module resolves where the store and the snapshot files live.
//!
//! # Layout
//!
//! Everything lives under one artifacts directory:
//!
//! ```text
//! <artifacts>/db/data.db      relational store
//! <artifacts>/csv/import.csv  last imported CSV
//! <artifacts>/csv/export.csv  last exported CSV
//! ```
//!
//! The resolved [`SyncPaths`] value is passed to the sync engine explicitly,
//! so tests can point each engine at its own temporary directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::sync::OperationKind;

/// Default artifacts directory, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Environment variable overriding the artifacts directory.
pub const ARTIFACTS_ENV: &str = "SHAADI_ARTIFACTS";

/// Environment variable overriding the store file.
pub const DB_ENV: &str = "SHAADI_DB";

/// File locations used by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPaths {
    /// SQLite store file.
    pub store: PathBuf,
    /// Snapshot of the last imported CSV.
    pub import_snapshot: PathBuf,
    /// Snapshot of the last exported CSV.
    pub export_snapshot: PathBuf,
}

impl SyncPaths {
    /// Standard layout under an artifacts root.
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            store: root.join("db").join("data.db"),
            import_snapshot: root.join("csv").join("import.csv"),
            export_snapshot: root.join("csv").join("export.csv"),
        }
    }

    /// Replace the store location, keeping the snapshot locations.
    #[must_use]
    pub fn with_store(mut self, store: PathBuf) -> Self {
        self.store = store;
        self
    }

    /// Snapshot location for an operation kind.
    #[must_use]
    pub fn snapshot(&self, kind: OperationKind) -> &Path {
        match kind {
            OperationKind::Import => &self.import_snapshot,
            OperationKind::Export => &self.export_snapshot,
        }
    }
}

/// Resolve the artifacts directory.
///
/// Priority:
/// 1. `explicit_path` (the `--artifacts` flag, which clap also fills from
///    `SHAADI_ARTIFACTS`)
/// 2. `./artifacts`
#[must_use]
pub fn resolve_artifacts_dir(explicit_path: Option<&Path>) -> PathBuf {
    explicit_path.map_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR), Path::to_path_buf)
}

/// Resolve the full set of sync paths from CLI options.
///
/// `db_override` (the `--db` flag / `SHAADI_DB`) replaces only the store
/// location.
#[must_use]
pub fn resolve_sync_paths(artifacts: Option<&Path>, db_override: Option<&Path>) -> SyncPaths {
    let paths = SyncPaths::under(&resolve_artifacts_dir(artifacts));
    match db_override {
        Some(db) => paths.with_store(db.to_path_buf()),
        None => paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = resolve_sync_paths(None, None);
        assert_eq!(paths.store, PathBuf::from("artifacts/db/data.db"));
        assert_eq!(paths.import_snapshot, PathBuf::from("artifacts/csv/import.csv"));
        assert_eq!(paths.export_snapshot, PathBuf::from("artifacts/csv/export.csv"));
    }

    #[test]
    fn test_explicit_artifacts_dir() {
        let paths = resolve_sync_paths(Some(Path::new("/tmp/wedding")), None);
        assert_eq!(paths.store, PathBuf::from("/tmp/wedding/db/data.db"));
        assert_eq!(
            paths.snapshot(OperationKind::Export),
            Path::new("/tmp/wedding/csv/export.csv")
        );
    }

    #[test]
    fn test_db_override_keeps_snapshots() {
        let paths = resolve_sync_paths(
            Some(Path::new("/tmp/wedding")),
            Some(Path::new("/srv/guests.db")),
        );
        assert_eq!(paths.store, PathBuf::from("/srv/guests.db"));
        assert_eq!(
            paths.snapshot(OperationKind::Import),
            Path::new("/tmp/wedding/csv/import.csv")
        );
    }
}
