//! Core logging types: toggle entries, status, and the [`Log`] trait.

/// Per-toggle outcome for summary reporting.
#[derive(Debug, Clone)]
pub struct ToggleEntry {
    /// Toggle display name.
    pub name: String,
    /// Final status of the toggle.
    pub status: ToggleStatus,
    /// Optional detail message (e.g., conflict or error description).
    pub message: Option<String>,
}

/// Outcome of processing one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleStatus {
    /// Toggle was enabled.
    Enabled,
    /// Toggle was disabled.
    Disabled,
    /// Toggle was already enabled and not offered again (interactive mode).
    Skipped,
    /// The operator answered no (interactive mode).
    Declined,
    /// Dry run; the transition was reported but not performed.
    DryRun,
    /// Toggle was already in the requested state (direct mode).
    Conflict,
    /// An action or the marker store failed.
    Failed,
}

impl ToggleStatus {
    /// Whether this outcome makes a direct-mode run exit non-zero.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self.tally(), Tally::Failed)
    }

    /// Which summary total this outcome counts towards.
    #[must_use]
    pub const fn tally(self) -> Tally {
        match self {
            Self::Enabled | Self::Disabled => Tally::Changed,
            Self::Skipped | Self::Declined | Self::DryRun => Tally::Unchanged,
            Self::Conflict | Self::Failed => Tally::Failed,
        }
    }

    /// Summary wording.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Skipped => "already enabled",
            Self::Declined => "declined",
            Self::DryRun => "dry run",
            Self::Conflict => "conflict",
            Self::Failed => "failed",
        }
    }

    /// Summary icon and its SGR colour code.
    pub(super) const fn glyph(self) -> (&'static str, &'static str) {
        match self {
            Self::Enabled | Self::Disabled => ("✓", "32"),
            Self::Skipped | Self::Declined => ("·", "2"),
            Self::DryRun => ("~", "37"),
            Self::Conflict => ("○", "33"),
            Self::Failed => ("✗", "31"),
        }
    }
}

/// Summary bucket of a [`ToggleStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    /// The marker changed.
    Changed,
    /// Nothing was changed, and nothing went wrong.
    Unchanged,
    /// Conflict or failure.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the console/file implementation;
/// tests substitute recording implementations so engine and mode code can
/// log without knowing where output goes.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a toggle outcome for the summary.
    fn record(&self, name: &str, status: ToggleStatus, message: Option<&str>);
}
