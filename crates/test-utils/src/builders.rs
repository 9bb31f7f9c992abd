#![allow(dead_code)]

use serde_json::Value;
use stepwise::config::{ConfigSection, RawScriptFile, Script, StepConfig};

/// Builder for `Script` to simplify test setup.
pub struct ScriptBuilder {
    script: RawScriptFile,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            script: RawScriptFile {
                config: ConfigSection::default(),
                step: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.script.config.description = description.to_string();
        self
    }

    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.script.config.continue_on_error = enabled;
        self
    }

    pub fn trace_length(mut self, width: i64) -> Self {
        self.script.config.trace_length = width;
        self
    }

    pub fn timeout(mut self, timeout: &str) -> Self {
        self.script.config.timeout = Some(timeout.to_string());
        self
    }

    pub fn step(mut self, step: StepConfig) -> Self {
        self.script.step.push(step);
        self
    }

    pub fn bash(self, cmd: &str) -> Self {
        self.step(StepConfig::Bash(cmd.to_string()))
    }

    pub fn set(self, name: &str, value: impl Into<Value>) -> Self {
        self.step(StepConfig::Set {
            name: name.to_string(),
            value: value.into(),
        })
    }

    pub fn and(self, description: &str) -> Self {
        self.step(StepConfig::And(description.to_string()))
    }

    pub fn recover(self, description: &str) -> Self {
        self.step(StepConfig::Recover(description.to_string()))
    }

    pub fn fail(self, message: &str) -> Self {
        self.step(StepConfig::Fail(message.to_string()))
    }

    /// The unvalidated script.
    pub fn raw(self) -> RawScriptFile {
        self.script
    }

    pub fn build(self) -> Script {
        Script::try_from(self.script).expect("Failed to build valid script from builder")
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
