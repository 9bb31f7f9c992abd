// src/runner.rs

//! Plays a validated [`Script`] on a [`Step`].
//!
//! Each `[[step]]` entry maps onto one operator, so a script behaves exactly
//! like the equivalent chain written in Rust: a failure turns the remaining
//! entries into no-ops until a `recover` entry clears it.

use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigSection, Script, StepConfig};
use crate::env::{TRACE, TRACE_LENGTH};
use crate::exec::ProcessShell;
use crate::step::Step;

/// The shell described by `[config]`.
pub fn shell_for(script: &Script) -> ProcessShell {
    let shell = ProcessShell::new(script.config().shell.as_str());
    match script.timeout() {
        Some(limit) => shell.with_timeout(limit),
        None => shell,
    }
}

/// Begin a chain for `script` using the process startup state.
pub fn build_step(script: &Script) -> Step {
    let mut step = Step::begin(script.config().description.as_str()).with_shell(shell_for(script));
    configure(&mut step, script.config());
    step
}

/// Apply the `[config]` policy and trace settings to `step`.
pub fn configure<'s>(step: &'s mut Step, config: &ConfigSection) -> &'s mut Step {
    step.continue_on_error(config.continue_on_error)
        .set(TRACE, config.trace)
        .set(TRACE_LENGTH, config.trace_length)
}

/// Run every entry of `steps` in order.
pub fn play<'s>(step: &'s mut Step, steps: &[StepConfig]) -> &'s mut Step {
    for entry in steps {
        debug!(op = entry.op_name(), failed = step.is_failed(), "script step");
        apply(step, entry);
    }
    step
}

fn apply(step: &mut Step, entry: &StepConfig) {
    match entry {
        StepConfig::And(description) => {
            step.and(description.as_str());
        }
        StepConfig::Set { name, value } => {
            step.set(name, value.clone());
        }
        StepConfig::Bash(cmd) => {
            step.bash(cmd);
        }
        StepConfig::Sbash { cmd, into } => {
            let stdout = step.sbash(cmd);
            if let Some(into) = into {
                step.capture(into, stdout.trim());
            }
        }
        StepConfig::Expand { template, file } => {
            step.expand(template, file);
        }
        StepConfig::Sexpand { template, into } => {
            let text = step.sexpand(template);
            step.capture(into, text);
        }
        StepConfig::Recover(description) => {
            step.recover(description.as_str());
        }
        StepConfig::Fail(message) => {
            step.fail(message.as_str());
        }
        StepConfig::Distinct { file, column, into } => {
            let shown = file.display().to_string();
            step.operate("Distinct", &[shown.as_str(), column.as_str(), into.as_str()], |step| {
                let rows = step.read_csv(file);
                if step.is_failed() {
                    return;
                }
                match rows.select_column_distinct_values(column) {
                    Ok(mut values) => {
                        values.sort();
                        step.set(into, Value::from(values));
                    }
                    Err(err) => {
                        step.fail_err(err);
                    }
                }
            });
        }
    }
}
