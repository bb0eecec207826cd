//! Command: print a shell completion script.
use std::io::Write;

use anyhow::{Context as _, Result};
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for the requested shell to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_script(opts.shell, &mut out)?;
    out.flush().context("failed to write completions")
}

/// Generate the completion script for `shell` into `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be flushed.
pub fn write_script(shell: clap_complete::Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    out.flush().context("failed to write completions")
}
