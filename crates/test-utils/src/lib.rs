pub mod builders;
pub mod fake_shell;

use std::sync::{Arc, Mutex, Once};

use stepwise::logging::LogSink;
use stepwise::step::{HookContext, Hooks, OpCall};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

pub use fake_shell::FakeShell;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Log sink that keeps every line as `"<LEVEL>: <line>"`.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to a step.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines logged at `level`, without the level prefix.
    pub fn at(&self, level: Level) -> Vec<String> {
        let prefix = format!("{level}: ");
        self.lines()
            .into_iter()
            .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Trace lines (`[Op args]`) in the order they were written.
    pub fn traces(&self) -> Vec<String> {
        self.at(Level::INFO)
            .into_iter()
            .filter(|line| line.starts_with('['))
            .collect()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.lines().iter().any(|line| line.contains(fragment))
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl LogSink for MemorySink {
    fn line(&self, level: Level, line: &str) {
        self.lines.lock().unwrap().push(format!("{level}: {line}"));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

/// One hook invocation as seen by [`RecordingHooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub phase: Phase,
    pub op: String,
    pub args: Vec<String>,
    pub description: String,
}

/// Hook strategy that records every `before`/`after` call.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Compact `"before:Op"` / `"after:Op"` view of the calls.
    pub fn sequence(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| {
                let phase = match call.phase {
                    Phase::Before => "before",
                    Phase::After => "after",
                };
                format!("{phase}:{}", call.op)
            })
            .collect()
    }

    fn record(&self, phase: Phase, call: &OpCall<'_>, cx: &HookContext<'_>) {
        self.calls.lock().unwrap().push(RecordedCall {
            phase,
            op: call.op.to_string(),
            args: call.args.iter().map(|arg| arg.to_string()).collect(),
            description: cx.description.to_string(),
        });
    }
}

impl Hooks for RecordingHooks {
    fn before(&mut self, call: &OpCall<'_>, cx: &HookContext<'_>) {
        self.record(Phase::Before, call, cx);
    }

    fn after(&mut self, call: &OpCall<'_>, cx: &HookContext<'_>) {
        self.record(Phase::After, call, cx);
    }
}
