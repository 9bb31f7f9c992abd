// src/startup.rs

//! Process-wide startup state: the already-parsed flags and positional
//! arguments a [`Step`](crate::step::Step) captures when it begins.
//!
//! The driver (see `main.rs`) parses the command line once and hands the
//! result to [`install`]. Steps only ever read a copy, so nothing here is
//! mutated after startup.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde_json::Value;

static STARTUP: OnceLock<Invocation> = OnceLock::new();

/// Flags (name -> value) and positional arguments of the host process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub flags: BTreeMap<String, Value>,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.flags.insert(name.to_string(), value.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Register the startup state for this process.
///
/// Returns `false` if startup state was already installed; the first
/// registration wins.
pub fn install(invocation: Invocation) -> bool {
    STARTUP.set(invocation).is_ok()
}

/// Copy of the installed startup state, or an empty one if the driver never
/// called [`install`].
pub fn current() -> Invocation {
    STARTUP.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_flags_and_args_in_order() {
        let inv = Invocation::new()
            .with_flag("is_it_cricket", true)
            .with_arg("first")
            .with_arg("second");

        assert_eq!(inv.flags.get("is_it_cricket"), Some(&Value::Bool(true)));
        assert_eq!(inv.args, vec!["first".to_string(), "second".to_string()]);
    }
}
