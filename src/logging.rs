// src/logging.rs

//! Logging setup for `stepwise` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `STEPWISE_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that command stdout can be used purely for
//! script output.
//!
//! Steps do not log through `tracing` directly; they write preformatted
//! lines to a [`LogSink`]. [`TracingSink`] is the default and forwards each
//! line as a `tracing` event under the `stepwise::step` target.

use anyhow::Result;
use tracing::{Level, debug, error, info, trace, warn};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Destination for step log and trace lines.
pub trait LogSink {
    fn line(&self, level: Level, line: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn line(&self, level: Level, line: &str) {
        if level == Level::ERROR {
            error!(target: "stepwise::step", "{line}");
        } else if level == Level::WARN {
            warn!(target: "stepwise::step", "{line}");
        } else if level == Level::INFO {
            info!(target: "stepwise::step", "{line}");
        } else if level == Level::DEBUG {
            debug!(target: "stepwise::step", "{line}");
        } else {
            trace!(target: "stepwise::step", "{line}");
        }
    }
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("STEPWISE_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(Level::INFO),
    };

    // Send logs to stderr; keep stdout free for command output.
    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_strings_are_case_and_space_insensitive() {
        assert_eq!(parse_level_str(" DEBUG "), Some(Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }

    #[test]
    fn cli_level_maps_one_to_one() {
        assert_eq!(level_from_log_level(LogLevel::Trace), Level::TRACE);
        assert_eq!(level_from_log_level(LogLevel::Error), Level::ERROR);
    }
}
