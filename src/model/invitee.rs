//! Invitee model.
//!
//! An invitee is one row of the guest list. The store assigns the `id`;
//! everything else comes from the tabular file.

use serde::{Deserialize, Serialize};

/// The client-supplied attributes of an invitee.
///
/// Optional attributes are `None` when the tabular field was empty, and are
/// stored as SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeFields {
    /// Display name (required, non-empty)
    pub name: String,

    /// Formal name printed on the invitation card
    pub name_on_card: Option<String>,

    /// Number of attendees in the party, kept as written
    pub party_size: Option<String>,

    /// Phone number
    pub phone: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Sub-events this invitee is invited to, as one delimited string
    pub events: Option<String>,

    /// Free-form tags
    pub tags: Option<String>,

    /// Gifts given or received
    pub gifts: Option<String>,

    /// Notes
    pub notes: Option<String>,
}

impl InviteeFields {
    /// Create an invitee with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An invitee as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitee {
    /// Surrogate key assigned by the store
    pub id: i64,

    #[serde(flatten)]
    pub fields: InviteeFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_only_name() {
        let fields = InviteeFields::new("Asha");
        assert_eq!(fields.name, "Asha");
        assert!(fields.name_on_card.is_none());
        assert!(fields.notes.is_none());
    }

    #[test]
    fn test_invitee_serializes_flat() {
        let invitee = Invitee {
            id: 7,
            fields: InviteeFields {
                party_size: Some("3".to_string()),
                ..InviteeFields::new("Ravi")
            },
        };

        let json = serde_json::to_value(&invitee).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Ravi");
        assert_eq!(json["party_size"], "3");
        assert!(json["phone"].is_null());
    }
}
