//! Command: enable toggles, by flag or interactively.
use anyhow::Result;

use crate::cli::{EnableOpts, GlobalOpts};
use crate::error::Direction;
use crate::logging::{Log, Logger};

/// Run the enable command.
///
/// # Errors
///
/// Returns an error if setup fails or, in direct mode, if any requested
/// toggle was already enabled or failed to enable.
pub fn run(global: &GlobalOpts, opts: &EnableOpts, log: &Logger) -> Result<()> {
    if opts.interactive {
        return super::interactive::run(global, log);
    }

    let setup = super::CommandSetup::init(global, log)?;
    let engine = setup.engine(log);

    log.stage("Enabling");
    super::apply_direct(&engine, opts.toggles.selected(), Direction::Enable, log);
    super::finish(log)
}
