//! CSV import.
//!
//! Import is all-or-nothing: the file is fully read and every row validated
//! before the store is opened, and the rows are inserted in one transaction.
//! A byte-identical repeat of the last import is detected by fingerprint and
//! skipped.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::storage::InviteeStore;
use crate::sync::engine::SyncEngine;
use crate::sync::file::ensure_parent_dir;
use crate::sync::hash::{fingerprint_file, has_changed};
use crate::sync::mapper::to_record;
use crate::sync::tabular::read_rows;
use crate::sync::types::{ImportOutcome, ImportStats, OperationKind, SyncResult};

impl SyncEngine {
    /// Import a CSV guest list into the store.
    ///
    /// Steps:
    /// 1. Fingerprint the input; if the store exists and the input matches the
    ///    import snapshot, return [`ImportOutcome::Unchanged`]
    /// 2. Read and validate every row
    /// 3. Create the table if needed and insert all rows in one transaction
    /// 4. Replace the import snapshot with the input
    ///
    /// # Errors
    ///
    /// Returns an IO or format error if the file cannot be read, a validation
    /// error if any row is malformed, and a storage error if the insert fails.
    /// In every error case the store keeps its previous content.
    pub fn import(&self, path: &Path) -> SyncResult<ImportOutcome> {
        info!(path = %path.display(), "Importing guest list");

        let fingerprint = fingerprint_file(path)?;

        if self.store_exists() {
            if self.matches_last_import(&fingerprint) {
                info!(
                    path = %path.display(),
                    snapshot = %self.snapshots.snapshot_path(OperationKind::Import).display(),
                    "Input is identical to the last import, skipping"
                );
                return Ok(ImportOutcome::Unchanged { fingerprint });
            }
        } else {
            debug!(store = %self.paths.store.display(), "No store yet, first import");
        }

        let rows = read_rows(path)?;
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| to_record(row, idx + 1, path))
            .collect::<SyncResult<Vec<_>>>()?;
        debug!(rows = records.len(), "Rows validated");

        ensure_parent_dir(&self.paths.store)?;
        let ids = {
            let mut store = InviteeStore::open(&self.paths.store)?;
            store.insert_all(&records)?
        };
        info!(
            rows = ids.len(),
            store = %self.paths.store.display(),
            "Rows inserted"
        );

        self.snapshots.record_snapshot(OperationKind::Import, path)?;

        Ok(ImportOutcome::Imported(ImportStats {
            rows: ids.len(),
            first_id: ids.first().copied(),
            last_id: ids.last().copied(),
            fingerprint,
        }))
    }

    /// Whether `fingerprint` equals the import snapshot's.
    ///
    /// The snapshot slot belongs to the artifacts directory, not to a store:
    /// stores that share an artifacts directory share the last import. A store
    /// that does not exist yet is never deduplicated against it.
    ///
    /// A missing snapshot never matches. An unreadable one is logged and
    /// treated as not matching, so the import goes ahead.
    pub(crate) fn matches_last_import(&self, fingerprint: &str) -> bool {
        match self.snapshots.fingerprint(OperationKind::Import) {
            Ok(stored) => !has_changed(fingerprint, stored.as_deref()),
            Err(e) => {
                warn!(error = %e, "Could not fingerprint the import snapshot, importing anyway");
                false
            }
        }
    }
}
