//! Data models for the guest list.

pub mod invitee;

pub use invitee::{Invitee, InviteeFields};
