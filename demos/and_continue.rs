// demos/and_continue.rs

//! A failing command is ignored by `recover`, and the chain carries on under
//! a new description.
//!
//! `cargo run --example and_continue`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use stepwise::{Step, cli, logging, startup};

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    startup::install(args.invocation());

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let outcome = Step::begin("Get the star date, Cassian")
        .set("date", now)
        .and("Cassian, fail to print the date")
        .bash("ZZZZecho {{var.date}}")
        .recover("Bix resets the error and prints the date")
        .bash("echo {{var.date}}")
        .end();

    Ok(outcome.exit_code())
}
