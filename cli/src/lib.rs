//! Rolling Rhino Remix configuration toggler.
//!
//! Turns a small, fixed set of independent system customizations on or
//! off. Each toggle's state is one marker file under the configuration root
//! (`~/.rhino/config/` by default); the engine runs the system commands a
//! toggle needs and only then records the marker.
//!
//! The public API is organised into layers:
//!
//! - **[`markers`]**: the persisted on/off state
//! - **[`toggles`]**: the static registry and the actions it drives
//! - **[`engine`]**: idempotent enable/disable transitions with conflict reporting
//! - **[`commands`]**: top-level subcommand orchestration (`enable`, `disable`, `switch-kernel`, `status`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod markers;
pub mod operations;
pub mod prompt;
pub mod toggles;
