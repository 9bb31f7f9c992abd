// src/step/outcome.rs

use std::fmt;
use std::process::ExitCode;

/// Terminal result of a step chain, as returned by `Step::end`.
///
/// The core never exits the process itself; a driver inspects this value
/// (or receives it through the step's halt handler) and decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed {
        description: String,
    },
    Failed {
        description: String,
        status: i32,
        cause: Option<String>,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    pub fn description(&self) -> &str {
        match self {
            Outcome::Completed { description } | Outcome::Failed { description, .. } => description,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed { description } => write!(f, "'{description}' completed"),
            Outcome::Failed {
                description,
                status,
                cause,
            } => {
                write!(f, "'{description}' failed with status {status}")?;
                match cause {
                    Some(cause) => write!(f, ", {cause}"),
                    None => Ok(()),
                }
            }
        }
    }
}
