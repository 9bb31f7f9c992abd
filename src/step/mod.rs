// src/step/mod.rs

//! The execution context: a [`Step`] owns an [`Environment`], a failure
//! record and a continue-on-error policy, and exposes the chainable
//! operators scripts are written with.
//!
//! Every non-exempt operator follows the same protocol (see
//! [`Step::operate`]):
//!
//! 1. if the step is already failed, do nothing and return it unchanged;
//! 2. run the `before` hook;
//! 3. perform the effect, which may fail the step;
//! 4. run the `after` hook.
//!
//! Exempt operators: `continue_on_error`, `fail`, `fail_err`, `recover` and
//! `end`. Failure is sticky until `recover` clears it.

pub mod hooks;
pub mod outcome;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::Level;

use crate::driver;
use crate::env::{Environment, Flags, Variables, value_text};
use crate::errors::StepError;
use crate::exec::{ProcessShell, ShellBackend};
use crate::expand::expando;
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging::{LogSink, TracingSink};
use crate::startup::{self, Invocation};

pub use hooks::{HookContext, Hooks, OpCall, TraceHooks};
pub use outcome::Outcome;

/// Called with the failed outcome when a fail-fast failure happens or a
/// failed chain reaches `end`.
pub type HaltHandler = Box<dyn FnMut(&Outcome)>;

pub struct Step {
    description: String,
    status: i32,
    cause: Option<StepError>,
    continue_on_error: bool,
    env: Environment,
    hooks: Box<dyn Hooks>,
    sink: Arc<dyn LogSink>,
    shell: Box<dyn ShellBackend>,
    fs: Arc<dyn FileSystem>,
    on_halt: HaltHandler,
}

impl Step {
    /// Start a chain using the process startup state.
    ///
    /// The new step continues on error, has tracing enabled and halts the
    /// process through [`driver::exit_process`].
    pub fn begin(description: impl Into<String>) -> Self {
        Self::begin_with(description, startup::current())
    }

    /// Like [`Step::begin`] with explicit flags and arguments.
    pub fn begin_with(description: impl Into<String>, invocation: Invocation) -> Self {
        let step = Self {
            description: description.into(),
            status: 0,
            cause: None,
            continue_on_error: true,
            env: Environment::capture(invocation),
            hooks: Box::new(TraceHooks),
            sink: Arc::new(TracingSink),
            shell: Box::new(ProcessShell::default()),
            fs: Arc::new(RealFileSystem),
            on_halt: Box::new(driver::exit_process),
        };
        step.log(Level::INFO, &format!("begin '{}'", step.description));
        step
    }

    /// Start a chain whose operators dispatch through `hooks`.
    pub fn with_hooks(description: impl Into<String>, hooks: impl Hooks + 'static) -> Self {
        let description = description.into();
        let mut step = Self::begin(description.clone());
        step.init(hooks, description);
        step
    }

    pub fn with_shell(mut self, shell: impl ShellBackend + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    pub fn with_filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn with_logger(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn on_halt(mut self, handler: impl FnMut(&Outcome) + 'static) -> Self {
        self.on_halt = Box::new(handler);
        self
    }

    /// Rebind the hook strategy and reset the environment.
    ///
    /// Variables are cleared (apart from the tracing flag) and flags and
    /// arguments are captured again from the startup state.
    pub fn init(&mut self, hooks: impl Hooks + 'static, description: impl Into<String>) -> &mut Self {
        self.hooks = Box::new(hooks);
        self.description = description.into();
        self.env = Environment::capture(startup::current());
        self
    }

    /// Redirect log and trace lines to `sink`.
    pub fn set_logger(&mut self, sink: impl LogSink + 'static) -> &mut Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn cause(&self) -> Option<&StepError> {
        self.cause.as_ref()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn vars(&self) -> &Variables {
        self.env.vars()
    }

    pub fn flags(&self) -> &Flags {
        self.env.flags()
    }

    pub fn args(&self) -> &[String] {
        self.env.args()
    }

    pub fn continues_on_error(&self) -> bool {
        self.continue_on_error
    }

    pub fn is_failed(&self) -> bool {
        self.status != 0 || self.cause.is_some()
    }

    /// Snapshot of the current state as a terminal outcome.
    pub fn outcome(&self) -> Outcome {
        if self.is_failed() {
            Outcome::Failed {
                description: self.description.clone(),
                status: self.status,
                cause: self.cause.as_ref().map(ToString::to_string),
            }
        } else {
            Outcome::Completed {
                description: self.description.clone(),
            }
        }
    }

    /// Run `effect` as operator `op` under the standard protocol: skipped
    /// entirely when the step is failed, otherwise wrapped in the hooks.
    ///
    /// Types that wrap a `Step` use this to add their own operators.
    pub fn operate<F>(&mut self, op: &str, args: &[&str], effect: F) -> &mut Self
    where
        F: FnOnce(&mut Step),
    {
        if self.is_failed() {
            return self;
        }
        let call = OpCall::new(op, args);
        self.dispatch_before(&call);
        effect(self);
        self.dispatch_after(&call);
        self
    }

    pub fn continue_on_error(&mut self, enabled: bool) -> &mut Self {
        self.continue_on_error = enabled;
        self
    }

    /// Fail with a free-text cause.
    pub fn fail(&mut self, message: impl Into<String>) -> &mut Self {
        self.record_failure(StepError::Message(message.into()))
    }

    /// Fail with a structured cause.
    pub fn fail_err(&mut self, cause: impl Into<StepError>) -> &mut Self {
        self.record_failure(cause.into())
    }

    /// Relabel the current step.
    pub fn and(&mut self, description: impl Into<String>) -> &mut Self {
        let description = description.into();
        self.operate("AND", &[description.as_str()], |step| {
            step.description = description.clone();
            step.log(Level::INFO, &format!("AND '{}'", step.description));
        })
    }

    /// Clear any failure and relabel. Runs even when the step is failed.
    pub fn recover(&mut self, description: impl Into<String>) -> &mut Self {
        let description = description.into();
        let args = [description.as_str()];
        let call = OpCall::new("CONTINUE", &args);
        self.dispatch_before(&call);
        if self.is_failed() {
            let cause = self.cause.as_ref().map(ToString::to_string).unwrap_or_default();
            self.log(
                Level::WARN,
                &format!(
                    "ignoring failure of '{}' (status {}, {cause})",
                    self.description, self.status
                ),
            );
        }
        self.status = 0;
        self.cause = None;
        self.description = description.clone();
        self.dispatch_after(&call);
        self
    }

    /// Terminal operator. Always runs; a failed chain is reported and handed
    /// to the halt handler.
    pub fn end(&mut self) -> Outcome {
        let call = OpCall::new("END", &[]);
        self.dispatch_before(&call);
        let outcome = self.outcome();
        if outcome.is_success() {
            self.log(Level::INFO, &format!("END '{}'", self.description));
        } else {
            self.log(Level::ERROR, &format!("END {outcome}"));
        }
        self.dispatch_after(&call);
        if !outcome.is_success() {
            (self.on_halt)(&outcome);
        }
        outcome
    }

    /// Invoke `f` with this step.
    pub fn call<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Step),
    {
        self.operate("Call", &[], f)
    }

    /// Bind `value` to `name`.
    ///
    /// Text values are expanded against the current environment before they
    /// are stored. The raw text is bound first, so when expansion fails the
    /// variable keeps the unexpanded text and the step fails.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        let shown = value_text(&value);
        self.operate("Set", &[name, shown.as_str()], |step| step.bind(name, value))
    }

    /// Bind `value` to `name` verbatim, with no template expansion. Used for
    /// captured command output and already-rendered text.
    pub fn capture(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        let shown = value_text(&value);
        self.operate("Capture", &[name, shown.as_str()], |step| {
            step.env.bind(name, value);
        })
    }

    /// Bind any serialisable value to `name` as structured data.
    pub fn set_serialized<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        match serde_json::to_value(value) {
            Ok(value) => self.set(name, value),
            Err(source) => self.fail_err(StepError::Serialize {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Text form of variable `name`; empty when the step is failed or the
    /// variable is missing (the step then fails).
    pub fn get_string_var(&mut self, name: &str) -> String {
        let mut text = String::new();
        self.operate("GetStringVar", &[name], |step| match step.env.get(name) {
            Some(value) => text = value_text(value),
            None => {
                step.fail_err(StepError::MissingVariable(name.to_string()));
            }
        });
        text
    }

    pub(crate) fn filesystem(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub(crate) fn shell_mut(&mut self) -> &mut dyn ShellBackend {
        self.shell.as_mut()
    }

    pub(crate) fn log(&self, level: Level, line: &str) {
        self.sink.line(level, line);
    }

    fn bind(&mut self, name: &str, value: Value) {
        let Value::String(raw) = value else {
            self.env.bind(name, value);
            return;
        };
        self.env.bind(name, Value::String(raw.clone()));
        match expando(&raw, &self.env) {
            Ok(expanded) => self.env.bind(name, Value::String(expanded)),
            Err(err) => {
                self.fail_err(err);
            }
        }
    }

    fn record_failure(&mut self, cause: StepError) -> &mut Self {
        self.status = 1;
        self.cause = Some(cause);
        if !self.continue_on_error {
            let outcome = self.outcome();
            self.log(Level::ERROR, &outcome.to_string());
            (self.on_halt)(&outcome);
        }
        self
    }

    fn dispatch_before(&mut self, call: &OpCall<'_>) {
        let cx = HookContext {
            description: &self.description,
            env: &self.env,
            sink: self.sink.as_ref(),
        };
        self.hooks.before(call, &cx);
    }

    fn dispatch_after(&mut self, call: &OpCall<'_>) {
        let cx = HookContext {
            description: &self.description,
            env: &self.env,
            sink: self.sink.as_ref(),
        };
        self.hooks.after(call, &cx);
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("description", &self.description)
            .field("status", &self.status)
            .field("cause", &self.cause)
            .field("continue_on_error", &self.continue_on_error)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
