//! The toggle catalog and the actions toggles drive.
//!
//! - [`registry`]: the static, ordered table of every toggle
//! - [`actions`]: enable/disable procedures referenced by registry entries
pub mod actions;
pub mod registry;

use std::path::Path;

use anyhow::{Context as _, Result, bail};

use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::prompt::Answer;

/// Procedure run to realize (or reverse) a toggle.
///
/// Returns `Ok` only when every underlying step completed successfully.
pub type Action = fn(&ActionContext<'_>) -> Result<()>;

/// Registry groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    /// Exposed as `enable`/`disable` flags and walked by interactive mode.
    Feature,
    /// Driven by `switch-kernel`.
    Kernel,
}

/// A named, independently enable/disable-able customization.
#[derive(Debug)]
pub struct Toggle {
    /// Stable identifier; also the marker name and the CLI flag.
    pub id: &'static str,
    /// Optional short CLI flag.
    pub short: Option<char>,
    /// Display name used in messages.
    pub name: &'static str,
    /// Registry group.
    pub kind: ToggleKind,
    /// Interactive question.
    pub prompt: &'static str,
    /// Answer assumed for an empty reply.
    pub default: Answer,
    /// Help text for the enable flag.
    pub enable_help: &'static str,
    /// Help text for the disable flag.
    pub disable_help: &'static str,
    /// Run before the marker is set.
    pub enable: Action,
    /// Run before the marker is cleared; `None` means clearing is enough.
    pub disable: Option<Action>,
    /// Printed after a successful enable.
    pub enabled_message: &'static str,
    /// Printed after a successful disable.
    pub disabled_message: &'static str,
    /// Printed when the operator declines the interactive question.
    pub declined_message: &'static str,
}

/// Capabilities handed to an [`Action`].
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    /// Command executor.
    pub executor: &'a dyn Executor,
    /// Filesystem operations.
    pub fs: &'a dyn FileSystemOps,
    /// Logger.
    pub log: &'a dyn Log,
    /// Operator's home directory.
    pub home: &'a Path,
    /// Prefix for privileged commands (e.g. `sudo`); empty runs them directly.
    pub privilege_command: &'a str,
}

impl std::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("executor", &self.executor)
            .field("fs", &self.fs)
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("privilege_command", &self.privilege_command)
            .finish()
    }
}

impl ActionContext<'_> {
    /// Run an unprivileged command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        self.executor
            .run(program, args)
            .with_context(|| format!("running {program}"))?;
        Ok(())
    }

    /// Run `command` (program followed by arguments) with the privilege prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the privilege command is not on `PATH`, or if the
    /// command cannot be spawned or exits non-zero.
    pub fn privileged(&self, command: &[&str]) -> Result<()> {
        let Some((program, args)) = command.split_first() else {
            bail!("empty privileged command");
        };
        if self.privilege_command.is_empty() {
            return self.run(program, args);
        }
        if !self.executor.which(self.privilege_command) {
            bail!(
                "privilege command '{}' not found on PATH",
                self.privilege_command
            );
        }
        self.executor
            .run(self.privilege_command, command)
            .with_context(|| format!("running {program} as {}", self.privilege_command))?;
        Ok(())
    }

    /// Recursively remove `path`; an absent tree is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree exists but cannot be removed.
    pub fn remove_tree(&self, path: &Path) -> Result<()> {
        match self.fs.remove_dir_all(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                Err(e).with_context(|| format!("removing {}", path.display()))
            }
            _ => Ok(()),
        }
    }
}
