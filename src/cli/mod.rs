//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{ARTIFACTS_ENV, DB_ENV};
use crate::sync::OperationKind;

pub mod commands;

/// Shaadi planner - keep a CSV guest list and its SQLite store in sync
#[derive(Parser, Debug)]
#[command(name = "shaadi", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Artifacts directory holding the store and snapshots (default: ./artifacts)
    #[arg(long, global = true, env = ARTIFACTS_ENV)]
    pub artifacts: Option<PathBuf>,

    /// Store path (default: <artifacts>/db/data.db)
    ///
    /// Snapshots stay under the artifacts directory, so stores sharing one
    /// artifacts directory also share the last-import check: once a store
    /// exists, a file identical to the last import into any of them is skipped.
    #[arg(long, global = true, env = DB_ENV)]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a CSV guest list into the store
    Import {
        /// CSV file without a header row
        file: PathBuf,
    },

    /// Append every stored invitee to a CSV file
    Export {
        /// Target CSV file (created if missing)
        file: PathBuf,
    },

    /// List stored invitees
    List,

    /// Show store and snapshot status
    Status {
        /// Check whether importing this file would be skipped
        file: Option<PathBuf>,
    },

    /// Copy the last imported or exported file out of its snapshot slot
    Restore {
        /// Snapshot slot to restore
        #[arg(value_enum)]
        kind: SnapshotKind,

        /// Destination file
        dest: PathBuf,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Snapshot slot selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    /// The last imported guest list
    Import,
    /// The last export target
    Export,
}

impl From<SnapshotKind> for OperationKind {
    fn from(kind: SnapshotKind) -> Self {
        match kind {
            SnapshotKind::Import => Self::Import,
            SnapshotKind::Export => Self::Export,
        }
    }
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
