#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use stepwise::fs::mock::MockFileSystem;
use stepwise::{Invocation, Outcome, Step};
use stepwise_test_utils::{FakeShell, MemorySink};

/// Handles a test keeps after giving their counterparts to a step.
pub struct Fixture {
    pub sink: MemorySink,
    pub shell: FakeShell,
    pub fs: MockFileSystem,
    pub halts: Rc<RefCell<Vec<Outcome>>>,
}

impl Fixture {
    pub fn halt_count(&self) -> usize {
        self.halts.borrow().len()
    }
}

/// A step wired to in-memory logging, shell and filesystem, with halts
/// recorded instead of exiting.
pub fn step_with(description: &str, invocation: Invocation) -> (Step, Fixture) {
    stepwise_test_utils::init_tracing();
    let fixture = Fixture {
        sink: MemorySink::new(),
        shell: FakeShell::new(),
        fs: MockFileSystem::new(),
        halts: Rc::new(RefCell::new(Vec::new())),
    };
    let halts = Rc::clone(&fixture.halts);
    let step = Step::begin_with(description, invocation)
        .with_logger(fixture.sink.clone())
        .with_shell(fixture.shell.clone())
        .with_filesystem(fixture.fs.clone())
        .on_halt(move |outcome| halts.borrow_mut().push(outcome.clone()));
    (step, fixture)
}

pub fn step(description: &str) -> (Step, Fixture) {
    step_with(description, Invocation::default())
}

/// Same as [`step`] but with a caller-provided shell.
pub fn step_with_shell(description: &str, shell: FakeShell) -> (Step, Fixture) {
    let (step, mut fixture) = step(description);
    fixture.shell = shell.clone();
    (step.with_shell(shell), fixture)
}
