// Shared helpers for integration tests.
//
// Provides a scripted executor and a recording logger for driving the
// library API, and an isolated temporary environment (HOME, XDG dirs,
// configuration root, fake system commands) for running the built binary.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

use rhino_config::exec::{ExecResult, Executor};
use rhino_config::logging::{Log, ToggleStatus};

/// An executor whose calls succeed unless they match a failing prefix.
///
/// Every call's full command line is recorded.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    /// Every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose full line starts with `prefix` fail.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    /// Command lines of every call made so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("calls lock").push(line.clone());
        if self.failing.iter().any(|p| line.starts_with(p.as_str())) {
            anyhow::bail!("{line} failed (exit 100): scripted failure");
        }
        Ok(ExecResult {
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn which(&self, _: &str) -> bool {
        true
    }
}

/// [`Log`] that keeps every message and summary record in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<(&'static str, String)>>,
    records: Mutex<Vec<(String, ToggleStatus)>>,
}

impl RecordingLog {
    /// Messages logged at `level`.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("lines lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded `(name, status)` pairs in order.
    pub fn records(&self) -> Vec<(String, ToggleStatus)> {
        self.records.lock().expect("records lock").clone()
    }

    /// Number of conflicts and failures recorded.
    pub fn failures(&self) -> usize {
        self.records()
            .iter()
            .filter(|(_, s)| s.is_failure())
            .count()
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push((level, msg.to_string()));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record(&self, name: &str, status: ToggleStatus, _message: Option<&str>) {
        self.records
            .lock()
            .expect("records lock")
            .push((name.to_string(), status));
    }
}

/// An isolated environment for running the `rhino-config` binary.
///
/// `HOME`, `XDG_CACHE_HOME` and `XDG_CONFIG_HOME` all point into a
/// [`tempfile::TempDir`], and the configuration root is passed with `--root`.
pub struct TestEnv {
    pub dir: tempfile::TempDir,
}

impl TestEnv {
    /// Create a fresh environment; the configuration root does not exist yet.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("home")).expect("create home");
        Self { dir }
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    pub fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    /// File that fake commands append their invocations to.
    pub fn command_log(&self) -> PathBuf {
        self.dir.path().join("commands.log")
    }

    pub fn marker(&self, id: &str) -> PathBuf {
        self.root().join(id)
    }

    /// Write `content` to the settings file.
    pub fn with_settings(self, content: &str) -> Self {
        let dir = self.config_home().join("rhino-config");
        std::fs::create_dir_all(&dir).expect("create settings dir");
        std::fs::write(dir.join("config.toml"), content).expect("write settings");
        self
    }

    /// Put a fake `program` on `PATH` that records its arguments and exits
    /// with `code`.
    #[cfg(unix)]
    pub fn with_fake_command(self, program: &str, code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt as _;

        std::fs::create_dir_all(self.bin_dir()).expect("create bin dir");
        let path = self.bin_dir().join(program);
        let script = format!(
            "#!/bin/sh\necho \"{program} $*\" >> '{}'\nexit {code}\n",
            self.command_log().display()
        );
        std::fs::write(&path, script).expect("write fake command");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("make fake command executable");
        self
    }

    /// Invocations recorded by fake commands, one per line.
    pub fn commands_run(&self) -> Vec<String> {
        std::fs::read_to_string(self.command_log())
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Build a command for the binary with `--root` pointing into the environment.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rhino-config"));
        cmd.arg("--root")
            .arg(self.root())
            .args(args)
            .env("HOME", self.home())
            .env("XDG_CACHE_HOME", self.dir.path().join("cache"))
            .env("XDG_CONFIG_HOME", self.config_home())
            .env_remove("RHINO_CONFIG_ROOT");
        if self.bin_dir().exists() {
            let path = std::env::var_os("PATH").unwrap_or_default();
            let mut dirs = vec![self.bin_dir()];
            dirs.extend(std::env::split_paths(&path));
            cmd.env("PATH", std::env::join_paths(dirs).expect("join PATH"));
        }
        cmd
    }

    /// Run the binary with `args` and no input.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(std::process::Stdio::null())
            .output()
            .expect("run rhino-config")
    }

    /// Run the binary with `args`, feeding `input` on stdin.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        use std::io::Write as _;

        let mut child = self
            .command(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .expect("spawn rhino-config");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("wait for rhino-config")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn exists(path: &Path) -> bool {
    path.try_exists().expect("check path")
}
