// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running rendered shell commands on behalf
//! of `Step::bash` and `Step::sbash`.
//!
//! - [`backend`] provides the `ShellBackend` trait and the concrete
//!   `ProcessShell` a step uses in production; tests can replace it with a
//!   fake implementation.
//! - [`process`] spawns `<shell> -c <command>` with `tokio::process` and
//!   turns exit statuses, signals and timeouts into [`CommandError`]s.
//! - [`bash`] holds the two step operators.

pub mod backend;
pub mod bash;
pub mod process;

use std::time::Duration;

use thiserror::Error;

pub use backend::{ProcessShell, ShellBackend};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with status {code}")]
    Exited { code: i32 },

    #[error("command terminated by signal {signal}")]
    Signalled { signal: i32 },

    #[error("command timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("waiting for command: {0}")]
    Io(#[source] std::io::Error),

    #[error("starting process runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
