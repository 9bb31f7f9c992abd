// src/step/hooks.rs

//! Pre/post instrumentation around every operator.
//!
//! A [`Step`](super::Step) owns one `Box<dyn Hooks>` and every operator,
//! including operators added by wrapping types through
//! [`Step::operate`](super::Step::operate), dispatches through it. Swapping
//! the strategy with [`Step::init`](super::Step::init) therefore changes the
//! instrumentation everywhere.
//!
//! [`TraceHooks`] is the default: when the `trace` variable is `true` it logs
//! one line per operator, cut to `trace_length` characters.

use tracing::Level;

use crate::env::{DEFAULT_TRACE_LENGTH, Environment, TRACE, TRACE_LENGTH, get_int_binding, is_enabled};
use crate::logging::LogSink;

/// Width the operator tag is padded to in trace lines.
const TAG_WIDTH: usize = 16;

const ELLIPSIS: &str = "...";

/// One operator invocation as seen by the hooks.
#[derive(Debug, Clone, Copy)]
pub struct OpCall<'a> {
    pub op: &'a str,
    pub args: &'a [&'a str],
}

impl<'a> OpCall<'a> {
    pub fn new(op: &'a str, args: &'a [&'a str]) -> Self {
        Self { op, args }
    }

    /// `[<op padded> <args...>]`
    pub fn trace_line(&self) -> String {
        format!("[{:<width$} {}]", self.op, self.args.join(" "), width = TAG_WIDTH)
    }
}

/// What a hook may look at while an operator runs.
pub struct HookContext<'a> {
    pub description: &'a str,
    pub env: &'a Environment,
    pub sink: &'a dyn LogSink,
}

pub trait Hooks {
    /// Runs before the operator's effect.
    fn before(&mut self, call: &OpCall<'_>, cx: &HookContext<'_>);

    /// Runs after the operator's effect, also when the effect failed the step.
    fn after(&mut self, _call: &OpCall<'_>, _cx: &HookContext<'_>) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TraceHooks;

impl Hooks for TraceHooks {
    fn before(&mut self, call: &OpCall<'_>, cx: &HookContext<'_>) {
        let vars = cx.env.vars();
        if !is_enabled(vars, TRACE) {
            return;
        }
        let width = get_int_binding(vars, TRACE_LENGTH, DEFAULT_TRACE_LENGTH).max(0);
        let width = usize::try_from(width).unwrap_or(usize::MAX);
        cx.sink.line(Level::INFO, &truncate(&call.trace_line(), width));
    }
}

/// First `width` characters of `text`, with `...` appended if anything was
/// cut. Counts characters, not bytes.
pub fn truncate(text: &str, width: usize) -> String {
    match text.char_indices().nth(width) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
