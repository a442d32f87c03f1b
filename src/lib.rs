//! Shaadi planner - guest list sync engine
//!
//! This crate provides the core functionality for the `shaadi` CLI tool,
//! which keeps a hand-edited CSV guest list and a SQLite store in step.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Invitee, InviteeFields)
//! - [`storage`] - SQLite database layer
//! - [`sync`] - CSV import/export, fingerprints and snapshots
//! - [`config`] - Artifact path resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod sync;

pub use error::{Error, Result};
