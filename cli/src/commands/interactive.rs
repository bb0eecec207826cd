//! Interactive mode: ask about every feature toggle in registry order.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::engine::Engine;
use crate::error::{Direction, ToggleState};
use crate::logging::{Log, Logger, ToggleStatus};
use crate::prompt::{Answer, LinePrompt, Prompt};
use crate::toggles::registry;

/// Printed once the walk is over.
pub const CLOSING_MESSAGE: &str = "The Rhino configuration has been updated.";

/// Run interactive mode on standard input and output.
///
/// Always returns `Ok` once setup succeeded; individual failures are
/// reported and recorded but do not change the exit status.
///
/// # Errors
///
/// Returns an error if `HOME` or the settings cannot be resolved, or the
/// configuration root cannot be prepared.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let engine = setup.engine(log);

    log.stage("Configuring Rolling Rhino Remix");
    walk(&engine, &mut LinePrompt::stdio(), log);
    log.print_summary();
    Ok(())
}

/// Walk the feature toggles once.
///
/// Enabled toggles are skipped without asking. A toggle whose state cannot
/// be read is reported and skipped; an unreadable reply counts as "no".
/// Earlier toggles are never rolled back.
pub fn walk(engine: &Engine<'_>, prompt: &mut dyn Prompt, log: &dyn Log) {
    for toggle in registry::features() {
        match engine.state(toggle) {
            Ok(ToggleState::Enabled) => {
                log.debug(&format!("{} is already enabled", toggle.name));
                log.record(toggle.name, ToggleStatus::Skipped, None);
                continue;
            }
            Ok(ToggleState::Disabled) => {}
            Err(e) => {
                let msg = e.to_string();
                log.error(&msg);
                log.record(toggle.name, ToggleStatus::Failed, Some(&msg));
                continue;
            }
        }

        let answer = prompt
            .ask(toggle.prompt, toggle.default)
            .unwrap_or_else(|e| {
                log.warn(&format!("{e:#}"));
                Answer::No
            });
        if answer == Answer::No {
            log.info(toggle.declined_message);
            log.record(toggle.name, ToggleStatus::Declined, None);
            continue;
        }

        match engine.apply(toggle, Direction::Enable) {
            Ok(transition) => log.record(toggle.name, transition.status(), None),
            Err(e) => {
                let msg = e.to_string();
                log.error(&msg);
                log.record(toggle.name, ToggleStatus::Failed, Some(&msg));
            }
        }
    }
    log.info(CLOSING_MESSAGE);
}
