// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every parsed option is also exposed to scripts as a flag, and trailing
//! positional arguments become the step's arguments (see [`CliArgs::invocation`]).

use clap::{Parser, ValueEnum};

use crate::startup::Invocation;
use crate::types::FlagAssignment;

/// Command-line arguments for `stepwise`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepwise",
    version,
    about = "Run a chain of shell, template and CSV steps described in a TOML script.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the script file (TOML).
    ///
    /// Default: `Stepwise.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Stepwise.toml")]
    pub script: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPWISE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Extra flag visible to templates as `{{flag.<name>}}`.
    ///
    /// The value is read as JSON when it parses (`true`, `3`, `[1,2]`),
    /// otherwise as plain text. Repeatable.
    #[arg(long = "flag", short = 'F', value_name = "NAME=VALUE")]
    pub flags: Vec<FlagAssignment>,

    /// Parse + validate, print the steps, but don't execute any of them.
    #[arg(long)]
    pub dry_run: bool,

    /// Positional arguments, visible to templates as `{{arg.[0]}}` etc.
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl CliArgs {
    /// Startup state for steps: built-in options first, then `--flag`
    /// assignments (which may override them), then positional arguments.
    pub fn invocation(&self) -> Invocation {
        let mut inv = Invocation::new()
            .with_flag("script", self.script.as_str())
            .with_flag("dry_run", self.dry_run);
        if let Some(level) = self.log_level {
            inv = inv.with_flag("log_level", level.as_str());
        }
        for assignment in &self.flags {
            inv.flags
                .insert(assignment.name.clone(), assignment.value.clone());
        }
        inv.args = self.args.clone();
        inv
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
