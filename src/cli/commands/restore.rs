//! Restore command implementation.

use crate::error::{Error, Result};
use crate::sync::{OperationKind, SyncEngine};
use colored::Colorize;
use std::path::Path;

/// Copy a snapshot slot to `dest`.
///
/// # Errors
///
/// Returns an error if nothing was recorded for `kind` or `dest` cannot be
/// written.
pub fn execute(engine: &SyncEngine, kind: OperationKind, dest: &Path, json: bool) -> Result<()> {
    let bytes = engine.restore(kind, dest).map_err(Error::sync("Restore"))?;

    if json {
        let output = serde_json::json!({
            "success": true,
            "kind": kind,
            "snapshot": engine.snapshots().snapshot_path(kind).display().to_string(),
            "dest": dest.display().to_string(),
            "bytes": bytes,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!(
        "{} {kind} snapshot to {} ({bytes} bytes)",
        "Restored".green().bold(),
        dest.display()
    );
    Ok(())
}
