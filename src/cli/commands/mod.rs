//! Command implementations.

pub mod completions;
pub mod list;
pub mod restore;
pub mod status;
pub mod sync;
pub mod version;
