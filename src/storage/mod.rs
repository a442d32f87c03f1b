//! SQLite storage layer for the guest list.
//!
//! This module provides the persistence layer using SQLite with:
//! - Create-if-absent schema provisioning
//! - Transaction discipline for atomic batch imports
//! - Read-only access for exports
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::InviteeStore;
