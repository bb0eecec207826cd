//! Operator settings and configuration root resolution.
//!
//! Settings come from an optional TOML file at
//! `$XDG_CONFIG_HOME/rhino-config/config.toml`:
//!
//! ```toml
//! root = "~/.rhino/config"
//! privilege_command = "sudo"
//! ```
pub mod toml_loader;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration root used when neither the CLI nor the settings file name one,
/// relative to `$HOME`.
pub const DEFAULT_ROOT: &str = ".rhino/config";

/// Values read from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Configuration root override; `~/` is expanded against `$HOME`.
    pub root: Option<PathBuf>,
    /// Prefix for privileged commands. Empty runs them directly.
    pub privilege_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            privilege_command: "sudo".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        toml_loader::load_config(path)
    }

    /// Location of the settings file for `home`, honoring `$XDG_CONFIG_HOME`.
    #[must_use]
    pub fn default_path(home: &Path) -> PathBuf {
        settings_path(std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from), home)
    }

    /// Resolve the configuration root.
    ///
    /// `cli_root` (from `--root` or `RHINO_CONFIG_ROOT`) wins over the
    /// settings file, which wins over `$HOME/.rhino/config`.
    #[must_use]
    pub fn resolve_root(&self, cli_root: Option<&Path>, home: &Path) -> PathBuf {
        cli_root
            .or(self.root.as_deref())
            .map_or_else(|| home.join(DEFAULT_ROOT), |p| expand_home(p, home))
    }
}

fn settings_path(xdg_config_home: Option<PathBuf>, home: &Path) -> PathBuf {
    xdg_config_home
        .filter(|p| p.is_absolute())
        .unwrap_or_else(|| home.join(".config"))
        .join("rhino-config")
        .join("config.toml")
}

/// Expand a leading `~` to `home`.
fn expand_home(path: &Path, home: &Path) -> PathBuf {
    path.strip_prefix("~")
        .map_or_else(|_| path.to_path_buf(), |rest| home.join(rest))
}
