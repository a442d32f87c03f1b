//! SQLite storage implementation.
//!
//! This module provides the relational store for invitees. Writes go through a
//! single IMMEDIATE transaction per batch so an import is applied completely
//! or not at all.

use crate::model::{Invitee, InviteeFields};
use crate::storage::schema::{apply_schema, table_exists, INVITEES_TABLE};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Result, Row, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

const INSERT_INVITEE_SQL: &str = "INSERT INTO invitees
    (name, name_on_card, num_of_members, address, phone_num, events, tags, gifts, note)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_INVITEES_SQL: &str = "SELECT id, name, name_on_card, num_of_members, address,
    phone_num, events, tags, gifts, note
    FROM invitees ORDER BY id ASC";

/// SQLite-backed invitee store.
#[derive(Debug)]
pub struct InviteeStore {
    conn: Connection,
}

impl InviteeStore {
    /// Open a store at the given path, creating the database file if needed.
    ///
    /// The schema is not applied here; [`InviteeStore::insert_all`] provisions
    /// it inside its write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    /// Open an existing store read-only. Never creates a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_existing(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection.
    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether the `invitees` table has been provisioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema catalog cannot be read.
    pub fn has_schema(&self) -> Result<bool> {
        table_exists(&self.conn, INVITEES_TABLE)
    }

    /// Insert a batch of invitees atomically.
    ///
    /// Creates the table if it is missing, inserts every record and commits.
    /// If any statement fails the transaction is rolled back on drop and the
    /// store is left exactly as it was. Returns the ids assigned by the store,
    /// in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation or any insert fails.
    pub fn insert_all(&mut self, records: &[InviteeFields]) -> Result<Vec<i64>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        apply_schema(&tx)?;

        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(INSERT_INVITEE_SQL)?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.name,
                    record.name_on_card,
                    record.party_size,
                    record.address,
                    record.phone,
                    record.events,
                    record.tags,
                    record.gifts,
                    record.notes,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        Ok(ids)
    }

    /// List every invitee in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (including when the table is missing).
    pub fn list_invitees(&self) -> Result<Vec<Invitee>> {
        let mut stmt = self.conn.prepare(SELECT_INVITEES_SQL)?;
        let rows = stmt.query_map([], map_invitee)?;
        rows.collect()
    }

    /// Count invitees in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_invitees(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM invitees", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn map_invitee(row: &Row<'_>) -> Result<Invitee> {
    Ok(Invitee {
        id: row.get(0)?,
        fields: InviteeFields {
            name: text_column(row, 1)?.unwrap_or_default(),
            name_on_card: text_column(row, 2)?,
            party_size: text_column(row, 3)?,
            address: text_column(row, 4)?,
            phone: text_column(row, 5)?,
            events: text_column(row, 6)?,
            tags: text_column(row, 7)?,
            gifts: text_column(row, 8)?,
            notes: text_column(row, 9)?,
        },
    })
}

/// Read a column as text regardless of its storage class.
///
/// Stores created by other tools may hold numbers in `num_of_members`; those
/// are rendered in their canonical decimal form. Empty text reads as `None`.
fn text_column(row: &Row<'_>, idx: usize) -> Result<Option<String>> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    };
    Ok(value.filter(|s| !s.is_empty()))
}
