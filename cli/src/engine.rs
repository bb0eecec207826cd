//! Toggle engine: the state machine behind every enable and disable.
//!
//! | Current  | Requested | Result                                               |
//! |----------|-----------|------------------------------------------------------|
//! | disabled | enable    | run enable action, then set the marker               |
//! | enabled  | enable    | [`ToggleError::Conflict`], nothing runs              |
//! | enabled  | disable   | run disable action (if any), then clear the marker   |
//! | disabled | disable   | [`ToggleError::Conflict`], nothing runs              |
//!
//! The marker is only touched after the action succeeded, so a failed action
//! leaves the persisted state exactly as it was.
use crate::error::{Direction, ToggleError, ToggleState};
use crate::logging::ToggleStatus;
use crate::markers::MarkerStore;
use crate::toggles::{ActionContext, Toggle};

/// Successful outcome of [`Engine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Toggle is now enabled.
    Enabled,
    /// Toggle is now disabled.
    Disabled,
    /// Dry run: the transition would have happened but nothing changed.
    DryRun(Direction),
}

impl Transition {
    /// Summary status for this outcome.
    #[must_use]
    pub const fn status(self) -> ToggleStatus {
        match self {
            Self::Enabled => ToggleStatus::Enabled,
            Self::Disabled => ToggleStatus::Disabled,
            Self::DryRun(_) => ToggleStatus::DryRun,
        }
    }
}

/// Applies transitions against a marker store.
#[derive(Debug)]
pub struct Engine<'a> {
    store: &'a dyn MarkerStore,
    ctx: ActionContext<'a>,
    dry_run: bool,
}

impl<'a> Engine<'a> {
    /// Create an engine over `store`, running actions with `ctx`.
    #[must_use]
    pub const fn new(store: &'a dyn MarkerStore, ctx: ActionContext<'a>, dry_run: bool) -> Self {
        Self {
            store,
            ctx,
            dry_run,
        }
    }

    /// Whether this engine is in dry-run mode.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Current persisted state of `toggle`.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::Storage`] if the marker cannot be read.
    pub fn state(&self, toggle: &'static Toggle) -> Result<ToggleState, ToggleError> {
        self.store
            .exists(toggle.id)
            .map(ToggleState::from_marker)
            .map_err(|source| ToggleError::Storage {
                id: toggle.id,
                name: toggle.name,
                source,
            })
    }

    /// Move `toggle` in `direction`.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::Storage`] if the marker cannot be read (before
    ///   anything runs) or updated (after the action succeeded)
    /// - [`ToggleError::Conflict`] if the toggle is already in the target state
    /// - [`ToggleError::Action`] if the action failed; the marker is unchanged
    pub fn apply(
        &self,
        toggle: &'static Toggle,
        direction: Direction,
    ) -> Result<Transition, ToggleError> {
        let target = direction.target();
        if self.state(toggle)? == target {
            return Err(ToggleError::Conflict {
                id: toggle.id,
                name: toggle.name,
                state: target,
            });
        }

        if self.dry_run {
            self.ctx
                .log
                .dry_run(&format!("would {direction} {}", toggle.name));
            return Ok(Transition::DryRun(direction));
        }

        let action = match direction {
            Direction::Enable => Some(toggle.enable),
            Direction::Disable => toggle.disable,
        };
        if let Some(action) = action {
            self.ctx
                .log
                .debug(&format!("running {direction} action for {}", toggle.id));
            action(&self.ctx).map_err(|cause| ToggleError::Action {
                id: toggle.id,
                name: toggle.name,
                direction,
                cause,
            })?;
        }

        let (stored, transition, message) = match direction {
            Direction::Enable => (
                self.store.set(toggle.id),
                Transition::Enabled,
                toggle.enabled_message,
            ),
            Direction::Disable => (
                self.store.clear(toggle.id),
                Transition::Disabled,
                toggle.disabled_message,
            ),
        };
        stored.map_err(|source| ToggleError::Storage {
            id: toggle.id,
            name: toggle.name,
            source,
        })?;

        self.ctx.log.info(message);
        Ok(transition)
    }
}
