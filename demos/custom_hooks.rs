// demos/custom_hooks.rs

//! A composed context: `DbStep` wraps a `Step`, times every operator with its
//! own hooks and adds a (mock) database query operator.
//!
//! `cargo run --example custom_hooks`

use std::ops::{Deref, DerefMut};
use std::process::ExitCode;
use std::time::Instant;

use stepwise::{HookContext, Hooks, OpCall, Step, cli, logging, startup};

/// Prints how long each operator took.
#[derive(Default)]
struct TimingHooks {
    started: Option<Instant>,
}

impl Hooks for TimingHooks {
    fn before(&mut self, _call: &OpCall<'_>, _cx: &HookContext<'_>) {
        self.started = Some(Instant::now());
    }

    fn after(&mut self, call: &OpCall<'_>, cx: &HookContext<'_>) {
        if let Some(started) = self.started.take() {
            println!(
                "{:?} {:?} in '{}' took {:?}",
                call.op,
                call.args,
                cx.description,
                started.elapsed()
            );
        }
    }
}

struct DbStep {
    step: Step,
    db_url: String,
}

impl DbStep {
    fn begin(description: &str, db_url: &str) -> Self {
        let mut step = Step::begin(description);
        step.init(TimingHooks::default(), description);
        Self {
            step,
            db_url: db_url.to_string(),
        }
    }

    /// Pretend to run `query` and print the rows it would return.
    fn postgres(&mut self, query: &str) -> &mut Self {
        let url = self.db_url.as_str();
        self.step.operate("PostgreSQL", &[query], |_step| {
            let rows = [["Name", "Runs"], ["Hales", "7"], ["Butler", "54"]];
            println!("{url}: {rows:?}");
        });
        self
    }
}

impl Deref for DbStep {
    type Target = Step;

    fn deref(&self) -> &Step {
        &self.step
    }
}

impl DerefMut for DbStep {
    fn deref_mut(&mut self) -> &mut Step {
        &mut self.step
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    startup::install(args.invocation());

    let mut s = DbStep::begin("Start example", "postgres://localhost:5234/mydatabase");
    s.and("Set a variable to the current date")
        .set("date", "today")
        .and("Use bash with a template interpolation")
        .bash("echo {{var.date}}")
        .and("Database query");
    s.postgres("select * from batters");

    Ok(s.end().exit_code())
}
