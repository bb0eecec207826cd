//! Command: switch to or away from an alternate kernel.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, SwitchKernelCommand};
use crate::error::Direction;
use crate::logging::{Log, Logger};
use crate::toggles::{Toggle, ToggleKind, registry};

/// Run the switch-kernel command.
///
/// # Errors
///
/// Returns an error if the kernel is unknown, setup fails, or the kernel
/// toggle was already in the requested state or failed to change.
pub fn run(global: &GlobalOpts, cmd: &SwitchKernelCommand, log: &Logger) -> Result<()> {
    let (direction, kernel) = match cmd {
        SwitchKernelCommand::Enable(arg) => (Direction::Enable, arg.kernel.as_str()),
        SwitchKernelCommand::Disable(arg) => (Direction::Disable, arg.kernel.as_str()),
    };
    let toggle = find_kernel(kernel)?;

    let setup = super::CommandSetup::init(global, log)?;
    let engine = setup.engine(log);

    log.stage("Switching kernel");
    super::apply_direct(&engine, [toggle], direction, log);
    super::finish(log)
}

fn find_kernel(id: &str) -> Result<&'static Toggle> {
    registry::find(id)
        .filter(|t| t.kind == ToggleKind::Kernel)
        .with_context(|| format!("unknown kernel '{id}'"))
}
