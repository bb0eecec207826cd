//! Domain-specific error types for the toggle engine.
//!
//! The marker store returns [`StoreError`]; the engine wraps every per-toggle
//! failure in a [`ToggleError`] that names the toggle it belongs to.  Command
//! handlers at the CLI boundary convert to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! ToggleError
//! ├── Conflict             toggle already in the requested state
//! ├── Action               enable/disable action did not complete
//! └── Storage(StoreError)  marker could not be read or written
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Persisted state of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Marker present.
    Enabled,
    /// Marker absent.
    Disabled,
}

impl ToggleState {
    /// Map marker presence to a state.
    #[must_use]
    pub const fn from_marker(present: bool) -> Self {
        if present { Self::Enabled } else { Self::Disabled }
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Requested transition for a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Turn the toggle on.
    Enable,
    /// Turn the toggle off.
    Disable,
}

impl Direction {
    /// The state a toggle ends up in once this transition succeeds.
    #[must_use]
    pub const fn target(self) -> ToggleState {
        match self {
            Self::Enable => ToggleState::Enabled,
            Self::Disable => ToggleState::Disabled,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => write!(f, "enable"),
            Self::Disable => write!(f, "disable"),
        }
    }
}

/// Errors raised by a marker store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configuration root could not be created.
    #[error("failed to create configuration root {}", .path.display())]
    CreateRoot {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration root exists but markers cannot be written into it.
    #[error("configuration root {} is not writable", .path.display())]
    NotWritable {
        /// Directory that rejected the write probe.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Marker presence could not be determined.
    #[error("failed to read marker '{id}'")]
    Read {
        /// Toggle identifier.
        id: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The marker could not be created.
    #[error("failed to write marker '{id}'")]
    Write {
        /// Toggle identifier.
        id: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The marker could not be removed.
    #[error("failed to remove marker '{id}'")]
    Remove {
        /// Toggle identifier.
        id: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Per-toggle failure reported by the engine.
///
/// Every variant names the toggle so the message can be printed on its own.
#[derive(Error, Debug)]
pub enum ToggleError {
    /// The toggle is already in the requested state; nothing was run.
    #[error("{name} is already {state}!")]
    Conflict {
        /// Toggle identifier.
        id: &'static str,
        /// Display name.
        name: &'static str,
        /// Current (and requested) state.
        state: ToggleState,
    },

    /// The enable or disable action failed; the marker was left untouched.
    #[error("failed to {direction} {name}: {cause:#}")]
    Action {
        /// Toggle identifier.
        id: &'static str,
        /// Display name.
        name: &'static str,
        /// Transition that was attempted.
        direction: Direction,
        /// Error returned by the action.
        cause: anyhow::Error,
    },

    /// The marker store could not be read or written.
    #[error("{name}: {source}")]
    Storage {
        /// Toggle identifier.
        id: &'static str,
        /// Display name.
        name: &'static str,
        /// Underlying store error.
        source: StoreError,
    },
}

impl ToggleError {
    /// Identifier of the toggle this error belongs to.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Conflict { id, .. } | Self::Action { id, .. } | Self::Storage { id, .. } => id,
        }
    }

    /// Whether this is a conflict rather than a failure.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
