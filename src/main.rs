// src/main.rs

use std::process::ExitCode;

use stepwise::{Outcome, cli, logging, run, startup};

fn main() -> ExitCode {
    match run_main() {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("stepwise error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run_main() -> anyhow::Result<Outcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    startup::install(args.invocation());
    run(args)
}
