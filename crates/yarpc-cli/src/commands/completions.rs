//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;
use yarpc_core::cli::ExitCode;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::CommandFactory;
/// use clap_complete::Shell;
/// use yarpc_cli::cli::Cli;
/// use yarpc_cli::commands::completions;
///
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut Cli::command(), &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("yarpc"));
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// Returns `Ok(ExitCode::SUCCESS)` on successful generation.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
