// demos/basic.rs

//! A straight chain: variables, a closure, shell commands and a template
//! written to a temporary file.
//!
//! `cargo run --example basic`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use stepwise::{Step, cli, logging, startup};

fn print_all_variables(step: &mut Step) {
    println!("{:#?}", step.vars());
}

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    startup::install(args.invocation());

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let mut s = Step::begin("Basic example");
    s.set("trace_length", 2000)
        .set("date", now)
        .call(print_all_variables)
        .bash("date")
        .bash("echo {{var.date}}");
    let tmp_file = s.sbash("mktemp");
    let tmp_file = tmp_file.trim();
    let outcome = s
        .set("tmp_file", tmp_file)
        .expand("tmp_file: {{var.tmp_file}} - Date: {{var.date}}\n", tmp_file)
        .bash("cat {{var.tmp_file}}")
        .bash("rm -f {{var.tmp_file}}")
        .end();

    Ok(outcome.exit_code())
}
