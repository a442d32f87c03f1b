//! CSV ⇄ SQLite sync operations.
//!
//! This module keeps a human-edited CSV guest list and the SQLite store in
//! step:
//!
//! - **Import**: CSV → store, skipped when the file is byte-identical to the
//!   last import, applied in one transaction otherwise
//! - **Export**: store → CSV, appended in id order
//! - **Hashing**: SHA256 fingerprints for change detection
//! - **Snapshots**: atomic copies of the last imported and exported files
//!
//! # File Format
//!
//! Plain CSV without a header. Imported rows carry nine fields; exported rows
//! carry the store id first:
//!
//! ```text
//! name,name_on_card,party_size,phone,address,events,tags,gifts,notes
//! 1,name,name_on_card,party_size,phone,address,events,tags,gifts,notes
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shaadi::config::SyncPaths;
//! use shaadi::sync::{ImportOutcome, SyncEngine};
//!
//! let engine = SyncEngine::new(SyncPaths::under(Path::new("artifacts")));
//! match engine.import(Path::new("guests.csv"))? {
//!     ImportOutcome::Unchanged { .. } => println!("nothing to do"),
//!     ImportOutcome::Imported(stats) => println!("{} rows", stats.rows),
//! }
//! engine.export(Path::new("guests-export.csv"))?;
//! ```

mod engine;
mod export;
mod file;
mod hash;
mod import;
pub mod mapper;
mod snapshot;
mod status;
pub mod tabular;
mod types;

// Re-export main types and functions
pub use engine::SyncEngine;
pub use file::{atomic_copy, ensure_parent_dir};
pub use hash::{fingerprint_file, has_changed};
pub use mapper::{to_record, to_tabular_row, FIELD_COUNT};
pub use snapshot::SnapshotStore;
pub use status::print_status;
pub use tabular::{read_rows, TabularRow, TabularWriter};
pub use types::{
    CandidateStatus, ExportStats, ImportOutcome, ImportStats, OperationKind, SnapshotInfo,
    SyncError, SyncErrorKind, SyncResult, SyncStatus,
};
