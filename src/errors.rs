// src/errors.rs

//! Crate-wide error types.
//!
//! [`StepError`] is what a failed [`Step`](crate::step::Step) records as its
//! cause. `Message` is the free-text failure produced by `Step::fail`; every
//! other variant is a structured failure carrying the underlying error.

use thiserror::Error;

use crate::exec::CommandError;
use crate::expand::ExpandError;
use crate::table::TableError;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("{0}")]
    Message(String),

    #[error("missing '{0}' variable")]
    MissingVariable(String),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("serialising value for variable '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl StepError {
    /// True for free-text failures recorded through `Step::fail`.
    pub fn is_message(&self) -> bool {
        matches!(self, StepError::Message(_))
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
