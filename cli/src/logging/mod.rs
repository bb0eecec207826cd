//! Console and log-file output plus the per-run toggle summary.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, Tally, ToggleEntry, ToggleStatus};

/// Held while a test points `XDG_CACHE_HOME` somewhere else.
#[cfg(test)]
static CACHE_HOME_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f` with `XDG_CACHE_HOME` set to `dir`, then unset it again.
#[cfg(test)]
fn with_cache_home<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let _lock = CACHE_HOME_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: every test that touches XDG_CACHE_HOME holds CACHE_HOME_LOCK.
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", dir);
    }
    let out = f();
    // SAFETY: as above.
    #[allow(unsafe_code)]
    unsafe {
        std::env::remove_var("XDG_CACHE_HOME");
    }
    out
}

/// A [`Logger`] whose events reach a log file in a fresh temp directory.
///
/// The file layer is installed as this thread's default dispatcher; keep the
/// returned guard alive for as long as the test logs.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let tmp = tempfile::tempdir().expect("temp dir");
    let (layer, log) = with_cache_home(tmp.path(), || {
        (subscriber::FileLayer::new("test"), Logger::new("test"))
    });
    let layer = layer.expect("file layer in temp cache dir");
    let registry = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let dispatch = tracing::Dispatch::new(registry);
    let guard = tracing::dispatcher::set_default(&dispatch);
    (log, tmp, guard)
}
