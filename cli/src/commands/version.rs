//! Command: print version information.

/// Build version, from `RHINO_CONFIG_VERSION` (set by `build.rs`) or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("RHINO_CONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the rhino-config version to stdout.
pub fn run() {
    println!("rhino-config {}", version());
}
