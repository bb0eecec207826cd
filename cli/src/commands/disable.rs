//! Command: disable toggles.
use anyhow::Result;

use crate::cli::{DisableOpts, GlobalOpts};
use crate::error::Direction;
use crate::logging::{Log, Logger};

/// Run the disable command.
///
/// # Errors
///
/// Returns an error if setup fails or any requested toggle was already
/// disabled or failed to disable.
pub fn run(global: &GlobalOpts, opts: &DisableOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let engine = setup.engine(log);

    log.stage("Disabling");
    super::apply_direct(&engine, opts.toggles.selected(), Direction::Disable, log);
    super::finish(log)
}
