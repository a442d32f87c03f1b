//! Positional codec between CSV rows and invitee records.
//!
//! The CSV layout is fixed by position:
//!
//! ```text
//! [id?, name, name_on_card, party_size, phone, address, events, tags, gifts, notes]
//! ```
//!
//! `id` only appears in exported rows. Imported rows start at `name`. This is
//! the only place that knows the layout.

use std::path::Path;

use crate::model::{Invitee, InviteeFields};
use crate::sync::tabular::TabularRow;
use crate::sync::types::{SyncError, SyncResult};

/// Number of positional fields an imported row must supply.
pub const FIELD_COUNT: usize = 9;

/// Field names in positional order, for messages and documentation.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "name",
    "name_on_card",
    "party_size",
    "phone",
    "address",
    "events",
    "tags",
    "gifts",
    "notes",
];

/// Map an imported row to invitee fields.
///
/// Fields past the ninth are ignored. Empty optional fields become `None`.
/// `row_number` is 1-indexed and `source` names the file; both only feed
/// error messages.
///
/// # Errors
///
/// Returns [`SyncError::Validation`] if the row has fewer than
/// [`FIELD_COUNT`] fields or the name is blank.
pub fn to_record(row: &[String], row_number: usize, source: &Path) -> SyncResult<InviteeFields> {
    let invalid = |message: String| SyncError::Validation {
        path: source.to_path_buf(),
        row: row_number,
        message,
    };

    if row.len() < FIELD_COUNT {
        return Err(invalid(format!(
            "expected at least {FIELD_COUNT} fields ({}), found {}",
            FIELD_NAMES.join(", "),
            row.len()
        )));
    }
    if row[0].trim().is_empty() {
        return Err(invalid("name is required".to_string()));
    }

    Ok(InviteeFields {
        name: row[0].clone(),
        name_on_card: optional(&row[1]),
        party_size: optional(&row[2]),
        phone: optional(&row[3]),
        address: optional(&row[4]),
        events: optional(&row[5]),
        tags: optional(&row[6]),
        gifts: optional(&row[7]),
        notes: optional(&row[8]),
    })
}

/// Map a stored invitee to an export row: `id` followed by the fields in
/// import order.
#[must_use]
pub fn to_tabular_row(invitee: &Invitee) -> TabularRow {
    let fields = &invitee.fields;
    let mut row = Vec::with_capacity(FIELD_COUNT + 1);
    row.push(invitee.id.to_string());
    row.push(fields.name.clone());
    for value in [
        &fields.name_on_card,
        &fields.party_size,
        &fields.phone,
        &fields.address,
        &fields.events,
        &fields.tags,
        &fields.gifts,
        &fields.notes,
    ] {
        row.push(value.clone().unwrap_or_default());
    }
    row
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}
