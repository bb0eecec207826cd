//! External command execution.
//!
//! Toggle actions never spawn processes directly; they go through the
//! [`Executor`] trait so tests can script command outcomes.
use anyhow::{Context, Result, bail};
use std::process::{Command, Output, Stdio};

/// Result of a command execution.
///
/// Standard output is inherited by the child process so package manager
/// progress stays visible; only standard error is captured.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs external programs to completion.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let label = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!("running: {label}");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to execute: {label}"))?;
        let result = ExecResult::from(output);
        if !result.success {
            match result.code {
                Some(code) => bail!("{label} failed (exit {code}): {}", result.stderr.trim()),
                None => bail!("{label} was terminated by a signal"),
            }
        }
        Ok(result)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
