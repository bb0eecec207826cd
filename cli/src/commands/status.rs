//! Command: show the state of every toggle.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::engine::Engine;
use crate::logging::Log;
use crate::toggles::{ToggleKind, registry};

/// Run the status command. Read-only; the configuration root is not created.
///
/// # Errors
///
/// Returns an error if setup fails or any marker cannot be read.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = super::CommandSetup::open(global, log)?;
    let engine = setup.engine(log);
    log.debug(&format!("reading {}", setup.store.root().display()));

    let failures = report(&engine, log);
    if failures > 0 {
        anyhow::bail!("{failures} toggle state(s) could not be read");
    }
    Ok(())
}

/// Log one line per toggle, grouped by kind. Returns the number of unreadable markers.
pub fn report(engine: &Engine<'_>, log: &dyn Log) -> usize {
    let mut failures = 0;
    for (kind, title) in [
        (ToggleKind::Feature, "Features"),
        (ToggleKind::Kernel, "Kernels"),
    ] {
        log.stage(title);
        for toggle in registry::of_kind(kind) {
            match engine.state(toggle) {
                Ok(state) => log.info(&format!("{:<12} {:<20} {state}", toggle.id, toggle.name)),
                Err(e) => {
                    failures += 1;
                    log.error(&e.to_string());
                }
            }
        }
    }
    failures
}
