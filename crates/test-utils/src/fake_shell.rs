use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use stepwise::exec::{CommandError, ShellBackend};

#[derive(Debug, Default)]
struct State {
    commands: Vec<String>,
    outputs: HashMap<String, String>,
    failures: Vec<(String, i32)>,
}

/// In-memory [`ShellBackend`]: records every rendered command and answers
/// with canned output or exit codes instead of spawning processes.
///
/// Clones share state, so a test keeps one handle while the step owns the
/// other.
#[derive(Debug, Clone, Default)]
pub struct FakeShell {
    state: Arc<Mutex<State>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capture` of exactly `command` returns `stdout`.
    pub fn with_output(self, command: &str, stdout: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .outputs
            .insert(command.to_string(), stdout.to_string());
        self
    }

    /// Any command containing `fragment` exits with `code`.
    pub fn failing_on(self, fragment: &str, code: i32) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((fragment.to_string(), code));
        self
    }

    /// Every command seen so far, rendered, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    fn record(&self, command: &str) -> Result<(), CommandError> {
        let mut state = self.state.lock().unwrap();
        state.commands.push(command.to_string());
        match state
            .failures
            .iter()
            .find(|(fragment, _)| command.contains(fragment.as_str()))
        {
            Some((_, code)) => Err(CommandError::Exited { code: *code }),
            None => Ok(()),
        }
    }
}

impl ShellBackend for FakeShell {
    fn run(&mut self, command: &str) -> Result<(), CommandError> {
        self.record(command)
    }

    fn capture(&mut self, command: &str) -> Result<String, CommandError> {
        self.record(command)?;
        let state = self.state.lock().unwrap();
        Ok(state.outputs.get(command).cloned().unwrap_or_default())
    }
}
