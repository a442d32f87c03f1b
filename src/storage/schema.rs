//! Database schema definitions.
//!
//! The store holds a single `invitees` table. It is created when missing and
//! never dropped or altered afterwards.

use rusqlite::{Connection, Result};

/// Name of the invitee table.
pub const INVITEES_TABLE: &str = "invitees";

/// The complete SQL schema for the guest store.
///
/// `num_of_members` is TEXT so that party sizes survive an import/export
/// round trip exactly as written (`"03"` stays `"03"`).
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS invitees (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    name_on_card TEXT,
    num_of_members TEXT,
    address TEXT,
    phone_num TEXT,
    events TEXT,
    tags TEXT,
    gifts TEXT,
    note TEXT
);
";

/// Create the schema if it does not exist yet.
///
/// Safe to call on every import, and inside an open transaction.
///
/// # Errors
///
/// Returns an error if the DDL cannot be executed.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Check whether a table exists in the database.
///
/// # Errors
///
/// Returns an error if `sqlite_master` cannot be queried.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?
        .exists([table])
}
