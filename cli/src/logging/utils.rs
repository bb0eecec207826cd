//! Log file location, ANSI stripping, and timestamps.
use std::fs;
use std::path::{Path, PathBuf};

/// Remove ANSI escape sequences so log files stay plain text.
///
/// A CSI sequence (`ESC [`) runs until its final byte in `@`..=`~`; a lone
/// `ESC` swallows the character after it.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            chars
                .by_ref()
                .take_while(|inner| !('@'..='~').contains(inner))
                .for_each(drop);
        }
    }
    out
}

/// Where run logs live, given the raw `XDG_CACHE_HOME` and `HOME` values.
///
/// A relative `XDG_CACHE_HOME` is ignored, like the config lookup does. With
/// neither variable set, logs go to `./.cache/rhino-config`.
fn cache_root(xdg_cache_home: Option<&str>, home: Option<&str>) -> PathBuf {
    let base = xdg_cache_home
        .map(Path::new)
        .filter(|p| p.is_absolute())
        .map_or_else(
            || Path::new(home.unwrap_or(".")).join(".cache"),
            Path::to_path_buf,
        );
    base.join("rhino-config")
}

/// Path of the log file for `command`, creating its directory if needed.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let xdg = std::env::var("XDG_CACHE_HOME").ok();
    let home = std::env::var("HOME").ok();
    let dir = cache_root(xdg.as_deref(), home.as_deref());
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`, for the run header.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time as `HH:MM:SS`, for each log line.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
