// src/exec/backend.rs

//! Pluggable shell backend abstraction.
//!
//! A step talks to a `ShellBackend` instead of spawning processes itself.
//! This makes it easy to swap in a fake shell in tests while keeping the
//! production implementation in [`super::process`].

use std::time::Duration;

use super::CommandError;
use super::process::{run_captured, run_streaming};

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "bash";

/// Trait abstracting how rendered commands are executed.
pub trait ShellBackend {
    /// Run `command`, streaming its stdout and stderr to this process.
    fn run(&mut self, command: &str) -> Result<(), CommandError>;

    /// Run `command` and return its stdout. Stderr still streams through.
    fn capture(&mut self, command: &str) -> Result<String, CommandError>;
}

/// Real backend: runs `<program> -c <command>` and blocks until it exits or
/// the optional timeout expires.
#[derive(Debug, Clone)]
pub struct ProcessShell {
    program: String,
    timeout: Option<Duration>,
}

impl ProcessShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ProcessShell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellBackend for ProcessShell {
    fn run(&mut self, command: &str) -> Result<(), CommandError> {
        run_streaming(&self.program, command, self.timeout)
    }

    fn capture(&mut self, command: &str) -> Result<String, CommandError> {
        run_captured(&self.program, command, self.timeout)
    }
}
