//! Status command implementation.

use crate::error::{Error, Result};
use crate::sync::{print_status, SyncEngine};
use std::path::Path;

/// Execute the status command.
///
/// With `file`, also reports whether importing it would be skipped.
///
/// # Errors
///
/// Returns an error if the store or a snapshot cannot be read, or if `file`
/// cannot be fingerprinted.
pub fn execute(engine: &SyncEngine, file: Option<&Path>, json: bool) -> Result<()> {
    let status = engine.status(file).map_err(Error::sync("Status"))?;

    if json {
        println!("{}", serde_json::to_string(&status)?);
    } else {
        print_status(&status);
    }
    Ok(())
}
