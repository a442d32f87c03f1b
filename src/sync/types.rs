//! Sync types for CSV import/export.
//!
//! Outcomes, statistics and errors shared by the sync engine components.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The two kinds of sync operation, each owning one snapshot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// CSV → store.
    Import,
    /// Store → CSV.
    Export,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import => write!(f, "import"),
            Self::Export => write!(f, "export"),
        }
    }
}

/// Result of an import call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The input is byte-identical to the last import; nothing was written.
    Unchanged {
        /// Fingerprint shared by the input and the import snapshot.
        fingerprint: String,
    },
    /// Rows were inserted and the import snapshot was replaced.
    Imported(ImportStats),
}

impl ImportOutcome {
    /// Returns true if the import was skipped as redundant.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }
}

/// Statistics for a completed import.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    /// Number of rows inserted.
    pub rows: usize,
    /// Id assigned to the first inserted row.
    pub first_id: Option<i64>,
    /// Id assigned to the last inserted row.
    pub last_id: Option<i64>,
    /// Fingerprint of the imported file.
    pub fingerprint: String,
}

/// Statistics for a completed export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportStats {
    /// Number of rows appended to the target.
    pub rows: usize,
    /// The target file.
    pub path: PathBuf,
    /// Fingerprint of the target after the export.
    pub fingerprint: String,
}

/// Information about a stored snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    /// Which operation produced the snapshot.
    pub kind: OperationKind,
    /// Location of the snapshot file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Content fingerprint.
    pub fingerprint: String,
    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

/// How a candidate file compares to the last import.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatus {
    /// The candidate file.
    pub path: PathBuf,
    /// Its fingerprint.
    pub fingerprint: String,
    /// True if importing it would be a no-op.
    pub matches_last_import: bool,
}

/// Sync status information.
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatus {
    /// Location of the store.
    pub store_path: PathBuf,
    /// Whether the store file exists.
    pub store_exists: bool,
    /// Number of invitees, when the store is provisioned.
    pub invitees: Option<usize>,
    /// The last import snapshot.
    pub import_snapshot: Option<SnapshotInfo>,
    /// The last export snapshot.
    pub export_snapshot: Option<SnapshotInfo>,
    /// Comparison against a candidate import file, if one was given.
    pub candidate: Option<CandidateStatus>,
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    /// File open/read/write/permission failure.
    Io,
    /// Malformed tabular content.
    Format,
    /// Row with too few fields or a missing required value.
    Validation,
    /// Schema creation or statement failure.
    Storage,
    /// Store or snapshot does not exist.
    NotFound,
}

/// Sync-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// IO error during file operations.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Tabular file could not be parsed.
    #[error("Malformed CSV in {} at line {line}: {message}", path.display())]
    Format {
        /// File being parsed.
        path: PathBuf,
        /// Line number (1-indexed).
        line: u64,
        /// Parser message.
        message: String,
    },

    /// A row does not satisfy the field contract.
    #[error("Invalid row {row} in {}: {message}", path.display())]
    Validation {
        /// File the row came from.
        path: PathBuf,
        /// Row number (1-indexed).
        row: usize,
        /// What is wrong with it.
        message: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Storage(String),

    /// Export or list against a store that was never created.
    #[error("Store not found: {}", path.display())]
    StoreNotFound {
        /// Expected store location.
        path: PathBuf,
    },

    /// Restore of a snapshot that was never recorded.
    #[error("No {kind} snapshot at {}", path.display())]
    SnapshotNotFound {
        /// Snapshot slot.
        kind: OperationKind,
        /// Expected snapshot location.
        path: PathBuf,
    },
}

impl SyncError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> SyncErrorKind {
        match self {
            Self::Io { .. } => SyncErrorKind::Io,
            Self::Format { .. } => SyncErrorKind::Format,
            Self::Validation { .. } => SyncErrorKind::Validation,
            Self::Storage(_) => SyncErrorKind::Storage,
            Self::StoreNotFound { .. } | Self::SnapshotNotFound { .. } => SyncErrorKind::NotFound,
        }
    }
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_display_matches_json() {
        for kind in [OperationKind::Import, OperationKind::Export] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
    }

    #[test]
    fn test_error_kinds() {
        let io = SyncError::io("guests.csv", std::io::Error::other("denied"));
        assert_eq!(io.kind(), SyncErrorKind::Io);
        assert!(io.to_string().contains("guests.csv"));

        let storage: SyncError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(storage.kind(), SyncErrorKind::Storage);

        let missing = SyncError::StoreNotFound {
            path: PathBuf::from("artifacts/db/data.db"),
        };
        assert_eq!(missing.kind(), SyncErrorKind::NotFound);
    }

    #[test]
    fn test_import_outcome_json_shape() {
        let unchanged = ImportOutcome::Unchanged {
            fingerprint: "abc".to_string(),
        };
        assert!(unchanged.is_unchanged());
        let json = serde_json::to_value(&unchanged).unwrap();
        assert_eq!(json["status"], "unchanged");

        let imported = ImportOutcome::Imported(ImportStats {
            rows: 2,
            first_id: Some(1),
            last_id: Some(2),
            fingerprint: "def".to_string(),
        });
        let json = serde_json::to_value(&imported).unwrap();
        assert_eq!(json["status"], "imported");
        assert_eq!(json["rows"], 2);
    }
}
