pub mod completions;
pub mod disable;
pub mod enable;
pub mod interactive;
pub mod status;
pub mod switch_kernel;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::Direction;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, ToggleStatus};
use crate::markers::{FsMarkerStore, MarkerStore};
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::toggles::{ActionContext, Toggle};

/// Shared state produced by the common command setup sequence.
///
/// Resolves `$HOME`, the settings file and the configuration root so that
/// each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    pub home: PathBuf,
    pub settings: Settings,
    pub store: FsMarkerStore,
    pub executor: SystemExecutor,
    pub fs: Arc<dyn FileSystemOps>,
    pub dry_run: bool,
}

impl CommandSetup {
    /// Resolve the environment and open the marker store without touching disk.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set or the settings file cannot be
    /// parsed.
    pub fn open(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .context("HOME environment variable is not set")?;

        let settings_path = Settings::default_path(&home);
        let settings = Settings::load(&settings_path)?;
        log.debug(&format!("settings: {}", settings_path.display()));

        let root = settings.resolve_root(global.root.as_deref(), &home);
        log.debug(&format!("configuration root: {}", root.display()));

        let fs: Arc<dyn FileSystemOps> = Arc::new(SystemFileSystemOps);
        Ok(Self {
            store: FsMarkerStore::new(root, Arc::clone(&fs)),
            home,
            settings,
            executor: SystemExecutor,
            fs,
            dry_run: global.dry_run,
        })
    }

    /// [`open`](Self::open), then create the configuration root and check it
    /// is writable. Skipped in dry-run mode, which never writes.
    ///
    /// # Errors
    ///
    /// Returns an error if setup fails or the root cannot be prepared.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let setup = Self::open(global, log)?;
        if setup.dry_run {
            log.dry_run(&format!(
                "would prepare configuration root {}",
                setup.store.root().display()
            ));
        } else {
            setup.store.init()?;
        }
        Ok(setup)
    }

    /// Build an engine over this setup's store and capabilities.
    #[must_use]
    pub fn engine<'a>(&'a self, log: &'a dyn Log) -> Engine<'a> {
        let ctx = ActionContext {
            executor: &self.executor,
            fs: self.fs.as_ref(),
            log,
            home: &self.home,
            privilege_command: &self.settings.privilege_command,
        };
        Engine::new(&self.store, ctx, self.dry_run)
    }
}

/// Apply `direction` to every toggle in order and record each outcome.
///
/// A conflict or failure is reported on the error stream and does not stop
/// the remaining toggles.
pub fn apply_direct(
    engine: &Engine<'_>,
    toggles: impl IntoIterator<Item = &'static Toggle>,
    direction: Direction,
    log: &dyn Log,
) {
    for toggle in toggles {
        match engine.apply(toggle, direction) {
            Ok(transition) => log.record(toggle.name, transition.status(), None),
            Err(e) => {
                let msg = e.to_string();
                log.error(&msg);
                let status = if e.is_conflict() {
                    ToggleStatus::Conflict
                } else {
                    ToggleStatus::Failed
                };
                log.record(toggle.name, status, Some(&msg));
            }
        }
    }
}

/// Print the summary and bail if any toggle recorded a conflict or failure.
///
/// # Errors
///
/// Returns an error if one or more toggles failed.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} toggle(s) failed");
    }
    Ok(())
}
