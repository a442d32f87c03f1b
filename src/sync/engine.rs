//! The sync engine.
//!
//! [`SyncEngine`] owns the configured paths and the snapshot slots. Import and
//! export live in their own modules as `impl SyncEngine` blocks; this module
//! holds construction and the store access shared by both.

use std::path::Path;

use tracing::debug;

use crate::config::SyncPaths;
use crate::model::Invitee;
use crate::storage::InviteeStore;
use crate::sync::snapshot::SnapshotStore;
use crate::sync::types::{OperationKind, SyncError, SyncResult};

/// Synchronizes a CSV guest list with the SQLite store.
///
/// Every call opens what it needs and releases it before returning, so an
/// engine can be kept around between operations. Calls are not synchronized
/// with each other; run one operation at a time against a given set of paths.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    pub(crate) paths: SyncPaths,
    pub(crate) snapshots: SnapshotStore,
}

impl SyncEngine {
    /// Create an engine for the given file locations.
    #[must_use]
    pub fn new(paths: SyncPaths) -> Self {
        let snapshots = SnapshotStore::new(&paths);
        Self { paths, snapshots }
    }

    /// The configured file locations.
    #[must_use]
    pub fn paths(&self) -> &SyncPaths {
        &self.paths
    }

    /// The snapshot slots.
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Whether the store file exists.
    #[must_use]
    pub fn store_exists(&self) -> bool {
        self.paths.store.exists()
    }

    /// Open the existing store read-only.
    ///
    /// A missing file and a file without the invitee table both count as "no
    /// store": export and list never create one.
    pub(crate) fn open_existing_store(&self) -> SyncResult<InviteeStore> {
        let not_found = || SyncError::StoreNotFound {
            path: self.paths.store.clone(),
        };

        if !self.store_exists() {
            debug!(store = %self.paths.store.display(), "Store file does not exist");
            return Err(not_found());
        }

        let store = InviteeStore::open_existing(&self.paths.store)?;
        if !store.has_schema()? {
            debug!(store = %self.paths.store.display(), "Store has no invitees table");
            return Err(not_found());
        }
        Ok(store)
    }

    /// All invitees in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::StoreNotFound`] if nothing was imported yet, or a
    /// storage error if the query fails.
    pub fn list(&self) -> SyncResult<Vec<Invitee>> {
        let store = self.open_existing_store()?;
        Ok(store.list_invitees()?)
    }

    /// Copy the `kind` snapshot to `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SnapshotNotFound`] if no such snapshot was
    /// recorded, or an IO error if the copy fails.
    pub fn restore(&self, kind: OperationKind, dest: &Path) -> SyncResult<u64> {
        self.snapshots.restore(kind, dest)
    }
}
