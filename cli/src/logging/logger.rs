//! The console/file [`Log`] implementation and the end-of-run summary.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, Tally, ToggleEntry, ToggleStatus};
use super::utils::log_file_path;

/// Emits messages as [`tracing`] events and remembers per-toggle outcomes.
///
/// Output is rendered by the subscriber from
/// [`init_subscriber`](super::subscriber::init_subscriber); each run also
/// lands in `$XDG_CACHE_HOME/rhino-config/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<ToggleEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for one `command` run. The log file itself belongs to the
    /// subscriber; only its path is kept here, for the summary.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Path of this run's log file, if the cache directory is usable.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Snapshot of the recorded outcomes, in recording order.
    #[must_use]
    pub fn entries(&self) -> Vec<ToggleEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Number of recorded conflicts and failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries().iter().filter(|e| e.status.is_failure()).count()
    }

    /// Log the recorded outcomes under a "Summary" stage, followed by the
    /// totals and the log file path. Nothing is printed if no toggle was
    /// processed.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }
        self.stage("Summary");

        let (mut changed, mut unchanged, mut failed) = (0usize, 0usize, 0usize);
        for entry in &entries {
            match entry.status.tally() {
                Tally::Changed => changed += 1,
                Tally::Unchanged => unchanged += 1,
                Tally::Failed => failed += 1,
            }
            self.info(&summary_line(entry));
        }

        self.info(&format!(
            "{} toggles: \x1b[32m{changed} changed\x1b[0m, \x1b[2m{unchanged} unchanged\x1b[0m, \x1b[31m{failed} failed\x1b[0m",
            entries.len()
        ));
        if let Some(path) = self.log_path() {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

fn summary_line(entry: &ToggleEntry) -> String {
    let (icon, colour) = entry.status.glyph();
    let detail = entry
        .message
        .as_deref()
        .map(|msg| format!(" ({msg})"))
        .unwrap_or_default();
    format!(
        "\x1b[{colour}m{icon} {} {}{detail}\x1b[0m",
        entry.name,
        entry.status.label()
    )
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record(&self, name: &str, status: ToggleStatus, message: Option<&str>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(ToggleEntry {
                name: name.to_owned(),
                status,
                message: message.map(str::to_owned),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn log_contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().expect("log path")).unwrap()
    }

    #[test]
    fn starts_without_entries() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entries().is_empty());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn records_keep_order_and_detail() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record("Pacstall", ToggleStatus::Conflict, Some("already enabled"));
        log.record("Snapdpurge", ToggleStatus::Enabled, None);
        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Pacstall");
        assert_eq!(entries[0].message.as_deref(), Some("already enabled"));
        assert_eq!(entries[1].status, ToggleStatus::Enabled);
    }

    #[test]
    fn conflicts_and_failures_are_counted() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record("a", ToggleStatus::Enabled, None);
        log.record("b", ToggleStatus::Conflict, None);
        log.record("c", ToggleStatus::Failed, Some("apt failed"));
        log.record("d", ToggleStatus::Declined, None);
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn every_level_reaches_the_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let id = std::process::id();
        log.debug(&format!("debug-{id}"));
        log.error(&format!("error-{id}"));
        log.stage("Enable");
        log.dry_run("would enable Pacstall");
        let contents = log_contents(&log);
        assert!(contents.contains(&format!("[debug] debug-{id}")));
        assert!(contents.contains(&format!("[error] error-{id}")));
        assert!(contents.contains("==> Enable"));
        assert!(contents.contains("[dry run] would enable Pacstall"));
    }

    #[test]
    fn summary_lists_every_entry() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record("Mainline kernel", ToggleStatus::Enabled, None);
        log.record("Snapdpurge", ToggleStatus::Failed, Some("apt failed"));
        log.print_summary();
        let contents = log_contents(&log);
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("✓ Mainline kernel enabled"));
        assert!(contents.contains("✗ Snapdpurge failed (apt failed)"));
        assert!(contents.contains("2 toggles: 1 changed, 0 unchanged, 1 failed"));
    }

    #[test]
    fn empty_summary_prints_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        log.print_summary();
        assert!(!log_contents(&log).contains("Summary"));
    }

    #[test]
    fn summary_line_formats_status() {
        let entry = ToggleEntry {
            name: "Pacstall".to_owned(),
            status: ToggleStatus::Skipped,
            message: None,
        };
        assert_eq!(summary_line(&entry), "\x1b[2m· Pacstall already enabled\x1b[0m");
    }
}
