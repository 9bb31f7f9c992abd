// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::exec::backend::DEFAULT_SHELL;

/// Top-level script file as read from TOML.
///
/// ```toml
/// [config]
/// description = "release"
/// continue_on_error = false
/// trace_length = 60
/// timeout = "30s"
///
/// [[step]]
/// set = { name = "target", value = "{{arg.[0]}}" }
///
/// [[step]]
/// bash = "make {{var.target}}"
///
/// [[step]]
/// and = "package"
/// ```
///
/// Steps run in file order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScriptFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// The `[[step]]` array.
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Description of the first step of the chain.
    #[serde(default = "default_description")]
    pub description: String,

    /// Keep going after a failure instead of halting at once.
    #[serde(default)]
    pub continue_on_error: bool,

    /// Whether operator trace lines are emitted.
    #[serde(default = "default_trace")]
    pub trace: bool,

    /// Maximum width of a trace line, in characters.
    #[serde(default = "default_trace_length")]
    pub trace_length: i64,

    /// Program used as `<shell> -c <command>`.
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Per-command timeout such as `"30s"` or `"250ms"`.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_description() -> String {
    "script".to_string()
}

fn default_trace() -> bool {
    true
}

fn default_trace_length() -> i64 {
    crate::env::DEFAULT_TRACE_LENGTH
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            description: default_description(),
            continue_on_error: false,
            trace: default_trace(),
            trace_length: default_trace_length(),
            shell: default_shell(),
            timeout: None,
        }
    }
}

/// One `[[step]]` entry. Each table holds exactly one operator key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum StepConfig {
    /// Start a new step with this description.
    And(String),

    Set {
        name: String,
        value: Value,
    },

    Bash(String),

    /// Run a command, optionally storing its trimmed stdout in `into`.
    Sbash {
        cmd: String,
        #[serde(default)]
        into: Option<String>,
    },

    Expand {
        template: String,
        file: PathBuf,
    },

    Sexpand {
        template: String,
        into: String,
    },

    /// Clear a failure and continue under this description.
    Recover(String),

    Fail(String),

    /// Store the sorted distinct values of a CSV column in `into`.
    Distinct {
        file: PathBuf,
        column: String,
        into: String,
    },
}

impl StepConfig {
    /// Operator name as shown in dry runs and traces.
    pub fn op_name(&self) -> &'static str {
        match self {
            StepConfig::And(_) => "AND",
            StepConfig::Set { .. } => "Set",
            StepConfig::Bash(_) => "Bash",
            StepConfig::Sbash { .. } => "Sbash",
            StepConfig::Expand { .. } => "Expand",
            StepConfig::Sexpand { .. } => "Sexpand",
            StepConfig::Recover(_) => "CONTINUE",
            StepConfig::Fail(_) => "Fail",
            StepConfig::Distinct { .. } => "Distinct",
        }
    }

    /// Variable this step writes to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            StepConfig::Set { name, .. } => Some(name),
            StepConfig::Sbash { into, .. } => into.as_deref(),
            StepConfig::Sexpand { into, .. } | StepConfig::Distinct { into, .. } => Some(into),
            _ => None,
        }
    }
}

/// A validated script. Built from [`RawScriptFile`] through `TryFrom`.
#[derive(Debug, Clone)]
pub struct Script {
    config: ConfigSection,
    steps: Vec<StepConfig>,
    timeout: Option<Duration>,
}

impl Script {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        steps: Vec<StepConfig>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            config,
            steps,
            timeout,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn steps(&self) -> &[StepConfig] {
        &self.steps
    }

    /// Parsed `[config].timeout`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
