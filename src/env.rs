// src/env.rs

//! The environment every operation reads from: variables, flags and
//! positional arguments.
//!
//! Variables are mutable for the life of a step. Flags and arguments are
//! captured once from [`Invocation`] and never change afterwards.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::startup::Invocation;

/// Variable bindings; later bindings of the same name overwrite earlier ones.
pub type Variables = BTreeMap<String, Value>;

/// Startup flags, read-only once captured.
pub type Flags = BTreeMap<String, Value>;

/// Variable that switches the default trace hook on or off.
pub const TRACE: &str = "trace";

/// Variable holding the maximum width (in characters) of a trace line.
pub const TRACE_LENGTH: &str = "trace_length";

pub const DEFAULT_TRACE_LENGTH: i64 = 80;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: Variables,
    flags: Flags,
    args: Vec<String>,
}

impl Environment {
    /// Fresh environment: tracing enabled, flags and arguments copied from
    /// `invocation`.
    pub fn capture(invocation: Invocation) -> Self {
        let mut vars = Variables::new();
        vars.insert(TRACE.to_string(), Value::Bool(true));
        Self {
            vars,
            flags: invocation.flags,
            args: invocation.args,
        }
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }
}

/// Integer value of `name`, or `default` when it is unset or not an integer.
pub fn get_int_binding(vars: &Variables, name: &str, default: i64) -> i64 {
    vars.get(name).and_then(Value::as_i64).unwrap_or(default)
}

/// True only when `name` is bound to boolean `true`.
pub fn is_enabled(vars: &Variables, name: &str) -> bool {
    vars.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Textual form of a stored value. Strings are returned as-is, everything
/// else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
