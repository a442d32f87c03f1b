//! Sync command implementations (CSV import/export).
//!
//! Both commands work against the store and snapshot slots resolved from
//! `--artifacts`/`--db`. A redundant import is reported as a notice, not an
//! error.

use crate::error::{Error, Result};
use crate::sync::{ImportOutcome, SyncEngine};
use colored::Colorize;
use std::path::Path;

/// Execute the import command.
///
/// # Errors
///
/// Returns an error if the guest list cannot be read or validated, or if the
/// store rejects the rows. The store is left unchanged in every error case.
pub fn import(engine: &SyncEngine, file: &Path, json: bool) -> Result<()> {
    let outcome = engine.import(file).map_err(Error::sync("Import"))?;

    if json {
        let output = serde_json::json!({
            "success": true,
            "file": file.display().to_string(),
            "store": engine.paths().store.display().to_string(),
            "outcome": outcome,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    match outcome {
        ImportOutcome::Unchanged { .. } => {
            println!(
                "{} {} is identical to the last import; nothing to do.",
                "Unchanged:".yellow().bold(),
                file.display()
            );
        }
        ImportOutcome::Imported(stats) => {
            println!("{}", "Import complete".green().bold());
            println!();
            println!("  Rows:  {}", stats.rows);
            if let (Some(first), Some(last)) = (stats.first_id, stats.last_id) {
                println!("  Ids:   {first}..={last}");
            }
            println!("  Store: {}", engine.paths().store.display());
        }
    }
    Ok(())
}

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the store does not exist or the target cannot be
/// written.
pub fn export(engine: &SyncEngine, file: &Path, json: bool) -> Result<()> {
    let stats = engine.export(file).map_err(Error::sync("Export"))?;

    if json {
        let output = serde_json::json!({
            "success": true,
            "stats": stats,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if stats.rows == 0 {
        println!("Store is empty; nothing appended to {}.", stats.path.display());
    } else {
        println!("{}", "Export complete".green().bold());
        println!();
        println!("  Rows:     {}", stats.rows);
        println!("  Location: {}", stats.path.display());
    }
    Ok(())
}
