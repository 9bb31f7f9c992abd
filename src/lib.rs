// src/lib.rs

//! `stepwise` builds scripts as chains of steps over a shared environment.
//!
//! ```no_run
//! use stepwise::Step;
//!
//! let outcome = Step::begin("build")
//!     .set("target", "release")
//!     .bash("cargo build --{{var.target}}")
//!     .and("package")
//!     .bash("tar czf app.tgz target/{{var.target}}")
//!     .end();
//! assert!(outcome.is_success());
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod env;
pub mod errors;
pub mod exec;
pub mod expand;
pub mod fs;
pub mod logging;
pub mod runner;
pub mod startup;
pub mod step;
pub mod table;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Script, StepConfig, load_and_validate};

pub use crate::env::{Environment, get_int_binding};
pub use crate::errors::StepError;
pub use crate::expand::expando;
pub use crate::startup::Invocation;
pub use crate::step::{HookContext, Hooks, OpCall, Outcome, Step, TraceHooks};
pub use crate::table::RowsOfFields;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the script, then either prints it (`--dry-run`) or
/// plays it on a fresh step and returns how the chain ended. Startup state
/// must already be installed.
pub fn run(args: CliArgs) -> Result<Outcome> {
    let script_path = PathBuf::from(&args.script);
    let script = load_and_validate(&script_path)
        .with_context(|| format!("loading script {:?}", script_path))?;

    if args.dry_run {
        print_dry_run(&script);
        return Ok(Outcome::Completed {
            description: script.config().description.clone(),
        });
    }

    info!(script = ?script_path, steps = script.steps().len(), "running script");
    let mut step = runner::build_step(&script);
    runner::play(&mut step, script.steps());
    Ok(step.end())
}

/// Simple dry-run output: print config and steps.
fn print_dry_run(script: &Script) {
    let cfg = script.config();
    println!("stepwise dry-run");
    println!("  config.description = {:?}", cfg.description);
    println!("  config.continue_on_error = {}", cfg.continue_on_error);
    println!("  config.trace = {}", cfg.trace);
    println!("  config.trace_length = {}", cfg.trace_length);
    println!("  config.shell = {:?}", cfg.shell);
    if let Some(limit) = script.timeout() {
        println!("  config.timeout = {limit:?}");
    }
    println!();

    println!("steps ({}):", script.steps().len());
    for (idx, step) in script.steps().iter().enumerate() {
        println!("  {:>3}. {}", idx + 1, describe(step));
    }

    debug!("dry-run complete (no execution)");
}

fn describe(step: &StepConfig) -> String {
    let op = step.op_name();
    match step {
        StepConfig::And(text) | StepConfig::Recover(text) | StepConfig::Fail(text) => {
            format!("{op} {text:?}")
        }
        StepConfig::Bash(cmd) => format!("{op} {cmd}"),
        StepConfig::Set { name, value } => format!("{op} {name} = {value}"),
        StepConfig::Sbash { cmd, into } => match into {
            Some(into) => format!("{op} {cmd} -> {into}"),
            None => format!("{op} {cmd}"),
        },
        StepConfig::Expand { template, file } => format!("{op} {template:?} -> {file:?}"),
        StepConfig::Sexpand { template, into } => format!("{op} {template:?} -> {into}"),
        StepConfig::Distinct { file, column, into } => {
            format!("{op} {file:?}[{column}] -> {into}")
        }
    }
}
