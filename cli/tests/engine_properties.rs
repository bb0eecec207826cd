#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the toggle engine and the interaction modes.
//!
//! These drive the public library API with an in-memory marker store, a
//! scripted executor and a real filesystem rooted in a temp directory.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{RecordingLog, ScriptedExecutor};
use rhino_config::commands::{apply_direct, interactive};
use rhino_config::engine::{Engine, Transition};
use rhino_config::error::{Direction, ToggleError, ToggleState};
use rhino_config::logging::ToggleStatus;
use rhino_config::markers::{FsMarkerStore, MarkerStore, MemoryMarkerStore};
use rhino_config::operations::SystemFileSystemOps;
use rhino_config::prompt::LinePrompt;
use rhino_config::toggles::registry::find;
use rhino_config::toggles::{ActionContext, Toggle};

fn toggle(id: &str) -> &'static Toggle {
    find(id).expect("registered toggle")
}

fn context<'a>(
    executor: &'a ScriptedExecutor,
    log: &'a RecordingLog,
    home: &'a Path,
) -> ActionContext<'a> {
    ActionContext {
        executor,
        fs: &SystemFileSystemOps,
        log,
        home,
        privilege_command: "sudo",
    }
}

// ---------------------------------------------------------------------------
// Idempotency
// ---------------------------------------------------------------------------

#[test]
fn enable_twice_conflicts_on_second_call() {
    let home = tempfile::tempdir().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let store = MemoryMarkerStore::new();
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);

    assert_eq!(
        engine.apply(toggle("mainline"), Direction::Enable).unwrap(),
        Transition::Enabled
    );
    let err = engine
        .apply(toggle("mainline"), Direction::Enable)
        .unwrap_err();

    assert!(matches!(
        err,
        ToggleError::Conflict {
            state: ToggleState::Enabled,
            ..
        }
    ));
    assert_eq!(
        engine.state(toggle("mainline")).unwrap(),
        ToggleState::Enabled
    );
}

#[test]
fn disable_twice_conflicts_on_second_call() {
    let home = tempfile::tempdir().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let store = MemoryMarkerStore::with_markers(["snapdpurge"]);
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);

    engine
        .apply(toggle("snapdpurge"), Direction::Disable)
        .unwrap();
    let calls = executor.calls().len();
    let err = engine
        .apply(toggle("snapdpurge"), Direction::Disable)
        .unwrap_err();

    assert_eq!(err.to_string(), "Snapdpurge is already disabled!");
    assert_eq!(executor.calls().len(), calls, "conflict must not run anything");
}

// ---------------------------------------------------------------------------
// Invariant preservation and independence
// ---------------------------------------------------------------------------

#[test]
fn failed_action_leaves_marker_state_unchanged() {
    let home = tempfile::tempdir().unwrap();
    let executor = ScriptedExecutor::new().failing_on("sudo apt install flatpak");
    let log = RecordingLog::default();
    let store = MemoryMarkerStore::with_markers(["pacstall"]);
    let before = store.markers();
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);

    let err = engine
        .apply(toggle("snapdpurge"), Direction::Enable)
        .unwrap_err();

    assert!(err.to_string().contains("failed to enable Snapdpurge"), "{err}");
    assert_eq!(store.markers(), before);
}

#[test]
fn one_failure_does_not_block_other_toggles() {
    let home = tempfile::tempdir().unwrap();
    let executor = ScriptedExecutor::new().failing_on("sudo apt autopurge");
    let log = RecordingLog::default();
    let store = MemoryMarkerStore::new();
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);

    apply_direct(
        &engine,
        [toggle("snapdpurge"), toggle("pacstall")],
        Direction::Enable,
        &log,
    );

    assert_eq!(store.markers(), vec!["pacstall"]);
    assert_eq!(log.failures(), 1);
    assert_eq!(log.at("error").len(), 1);
    assert!(log.at("error")[0].contains("Snapdpurge"));
}

// ---------------------------------------------------------------------------
// Round trip against the filesystem store
// ---------------------------------------------------------------------------

#[test]
fn snapdpurge_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    std::fs::create_dir_all(home.join("snap/firefox")).unwrap();
    let store = FsMarkerStore::new(dir.path().join("root"), Arc::new(SystemFileSystemOps));
    store.init().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let engine = Engine::new(&store, context(&executor, &log, &home), false);

    engine
        .apply(toggle("snapdpurge"), Direction::Enable)
        .unwrap();
    assert!(store.marker_path("snapdpurge").is_file());
    assert!(!home.join("snap").exists(), "~/snap should be removed");

    engine
        .apply(toggle("snapdpurge"), Direction::Disable)
        .unwrap();
    assert!(!store.marker_path("snapdpurge").exists());
    assert_eq!(
        executor.calls().last().map(String::as_str),
        Some("sudo apt-mark unhold snapd")
    );
}

// ---------------------------------------------------------------------------
// Interactive defaults
// ---------------------------------------------------------------------------

#[test]
fn empty_answers_take_each_default() {
    let home = tempfile::tempdir().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let store = MemoryMarkerStore::new();
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);
    let mut shown = Vec::new();
    let mut prompt = LinePrompt::new(&b"\n\n\n"[..], &mut shown);

    interactive::walk(&engine, &mut prompt, &log);

    assert_eq!(store.markers(), vec!["mainline", "pacstall"]);
    assert!(executor.calls().is_empty());
    let shown = String::from_utf8(shown).unwrap();
    assert!(shown.contains("replace it with Flatpak? [y/N]"), "{shown}");
    assert!(shown.contains("mainline kernel? [Y/n]"), "{shown}");
}

#[test]
fn explicit_yes_overrides_default_no() {
    let home = tempfile::tempdir().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let store = MemoryMarkerStore::new();
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);
    let mut prompt = LinePrompt::new(&b"n\nY\nno\n"[..], Vec::new());

    interactive::walk(&engine, &mut prompt, &log);

    assert_eq!(store.markers(), vec!["snapdpurge"]);
    assert_eq!(
        log.records(),
        vec![
            ("Mainline kernel".to_string(), ToggleStatus::Declined),
            ("Snapdpurge".to_string(), ToggleStatus::Enabled),
            ("Pacstall".to_string(), ToggleStatus::Declined),
        ]
    );
}

#[test]
fn interactive_walk_never_reports_failure_status() {
    let home = tempfile::tempdir().unwrap();
    let executor = ScriptedExecutor::new().failing_on("sudo");
    let log = RecordingLog::default();
    let store = MemoryMarkerStore::with_markers(["mainline"]);
    let engine = Engine::new(&store, context(&executor, &log, home.path()), false);
    let mut prompt = LinePrompt::new(&b"y\ny\n"[..], Vec::new());

    interactive::walk(&engine, &mut prompt, &log);

    assert_eq!(store.markers(), vec!["mainline", "pacstall"]);
    assert_eq!(
        log.records(),
        vec![
            ("Mainline kernel".to_string(), ToggleStatus::Skipped),
            ("Snapdpurge".to_string(), ToggleStatus::Failed),
            ("Pacstall".to_string(), ToggleStatus::Enabled),
        ]
    );
    assert!(
        log.at("info")
            .last()
            .is_some_and(|m| m == interactive::CLOSING_MESSAGE)
    );
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_changes_nothing() {
    let home = tempfile::tempdir().unwrap();
    let (executor, log) = (ScriptedExecutor::new(), RecordingLog::default());
    let store = MemoryMarkerStore::with_markers(["pacstall"]);
    let engine = Engine::new(&store, context(&executor, &log, home.path()), true);

    apply_direct(
        &engine,
        [toggle("snapdpurge"), toggle("pacstall")],
        Direction::Enable,
        &log,
    );

    assert_eq!(store.markers(), vec!["pacstall"]);
    assert!(executor.calls().is_empty());
    assert_eq!(
        log.records(),
        vec![
            ("Snapdpurge".to_string(), ToggleStatus::DryRun),
            ("Pacstall".to_string(), ToggleStatus::Conflict),
        ]
    );
}
