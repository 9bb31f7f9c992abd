// demos/templates.rs

//! Structured variables, flags and positional arguments in templates.
//!
//! `cargo run --example templates -- --flag is_it_cricket=true first second`

use std::process::ExitCode;

use serde::Serialize;
use stepwise::{Step, cli, logging, startup};

#[derive(Serialize)]
struct User {
    username: String,
    home: String,
}

fn current_user() -> User {
    User {
        username: std::env::var("USER").unwrap_or_else(|_| "nobody".to_string()),
        home: std::env::var("HOME").unwrap_or_else(|_| "/".to_string()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    startup::install(args.invocation());

    let outcome = Step::begin("variables and template example")
        .set_serialized("user", &current_user())
        .bash("ls -ld {{var.user.home}}")
        .expand(
            "{{var.user.username}} {{flag.is_it_cricket}} {{lookup arg 1}}\n",
            "/dev/stdout",
        )
        .end();

    Ok(outcome.exit_code())
}
