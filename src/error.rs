//! Error types for the shaadi CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=format/validation, 8=io)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

use crate::sync::{SyncError, SyncErrorKind};

/// Result type alias for shaadi operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    StorageError,

    // Not Found (exit 3)
    StoreNotFound,
    SnapshotNotFound,

    // Format / Validation (exit 4)
    FormatError,
    ValidationError,

    // I/O (exit 8)
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StorageError => "STORAGE_ERROR",
            Self::StoreNotFound => "STORE_NOT_FOUND",
            Self::SnapshotNotFound => "SNAPSHOT_NOT_FOUND",
            Self::FormatError => "FORMAT_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::StorageError => 2,
            Self::StoreNotFound | Self::SnapshotNotFound => 3,
            Self::FormatError | Self::ValidationError => 4,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller can succeed by fixing the guest list and retrying.
    ///
    /// Nothing is retried automatically.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::FormatError | Self::ValidationError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in shaadi CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{operation} failed: {source}")]
    Sync {
        /// Command that failed (`Import`, `Export`, ...).
        operation: &'static str,
        #[source]
        source: SyncError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Adapter for `map_err` that tags a [`SyncError`] with its command.
    pub fn sync(operation: &'static str) -> impl FnOnce(SyncError) -> Self {
        move |source| Self::Sync { operation, source }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Sync { source, .. } => match source.kind() {
                SyncErrorKind::Io => ErrorCode::IoError,
                SyncErrorKind::Format => ErrorCode::FormatError,
                SyncErrorKind::Validation => ErrorCode::ValidationError,
                SyncErrorKind::Storage => ErrorCode::StorageError,
                SyncErrorKind::NotFound => {
                    if matches!(source, SyncError::SnapshotNotFound { .. }) {
                        ErrorCode::SnapshotNotFound
                    } else {
                        ErrorCode::StoreNotFound
                    }
                }
            },
            Self::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Sync { source, .. } => match source {
                SyncError::StoreNotFound { path } => Some(format!(
                    "No store at {}. Run `shaadi import <file>` to create it.",
                    path.display()
                )),
                SyncError::SnapshotNotFound { kind, .. } => Some(format!(
                    "Nothing has been recorded for {kind} yet. \
                     Run `shaadi {kind} <file>` first."
                )),
                SyncError::Validation { .. } => Some(
                    "Each row needs 9 fields: name, name_on_card, party_size, phone, \
                     address, events, tags, gifts, notes. Nothing was imported."
                        .to_string(),
                ),
                SyncError::Format { .. } => Some(
                    "The guest list must be UTF-8 CSV without a header row. Quotes may only \
                     wrap a whole field, doubled inside it. Nothing was imported."
                        .to_string(),
                ),
                SyncError::Io { .. } | SyncError::Storage(_) => None,
            },

            Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
