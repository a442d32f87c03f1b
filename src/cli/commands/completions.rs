//! `shaadi completions <shell>`: print a completion script.

use crate::cli::{Cli, Shell};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};
use std::io;

/// Write the completion script for `shell` to stdout, covering every
/// subcommand and the global `--artifacts`/`--db` flags.
pub fn execute(shell: &Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut out = io::stdout();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &bin, &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &bin, &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &bin, &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &bin, &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, &bin, &mut out),
    }

    Ok(())
}
