// src/config/validate.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{RawScriptFile, Script, StepConfig};
use crate::errors::{Result, StepError};
use crate::types::parse_duration;

/// Names usable as `{{var.<name>}}` in templates.
static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

impl TryFrom<RawScriptFile> for Script {
    type Error = StepError;

    fn try_from(raw: RawScriptFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_script(&raw)?;
        let timeout = parse_timeout(&raw)?;
        Ok(Script::new_unchecked(raw.config, raw.step, timeout))
    }
}

fn validate_raw_script(script: &RawScriptFile) -> Result<()> {
    ensure_has_steps(script)?;
    validate_global_config(script)?;
    validate_steps(script)?;
    Ok(())
}

fn ensure_has_steps(script: &RawScriptFile) -> Result<()> {
    if script.step.is_empty() {
        return Err(StepError::ConfigError(
            "script must contain at least one [[step]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(script: &RawScriptFile) -> Result<()> {
    if script.config.trace_length < 1 {
        return Err(StepError::ConfigError(format!(
            "[config].trace_length must be >= 1 (got {})",
            script.config.trace_length
        )));
    }

    if script.config.shell.trim().is_empty() {
        return Err(StepError::ConfigError(
            "[config].shell must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_steps(script: &RawScriptFile) -> Result<()> {
    for (idx, step) in script.step.iter().enumerate() {
        if let Some(name) = step.target() {
            if !VARIABLE_NAME.is_match(name) {
                return Err(StepError::ConfigError(format!(
                    "step {} ({}): invalid variable name '{}'",
                    idx + 1,
                    step.op_name(),
                    name
                )));
            }
        }
        if let StepConfig::Distinct { column, .. } = step {
            if column.is_empty() {
                return Err(StepError::ConfigError(format!(
                    "step {} (Distinct): column must not be empty",
                    idx + 1
                )));
            }
        }
    }
    Ok(())
}

fn parse_timeout(script: &RawScriptFile) -> Result<Option<std::time::Duration>> {
    script
        .config
        .timeout
        .as_deref()
        .map(|raw| {
            parse_duration(raw).map_err(|e| {
                StepError::ConfigError(format!("invalid [config].timeout '{raw}': {e}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn parse(text: &str) -> Result<Script> {
        let raw: RawScriptFile = toml::from_str(text)?;
        Script::try_from(raw)
    }

    fn config_message(text: &str) -> String {
        match parse(text) {
            Err(StepError::ConfigError(msg)) => msg,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn valid_script_keeps_steps_and_parses_timeout() {
        let script = parse(
            r#"
            [config]
            timeout = "250ms"

            [[step]]
            bash = "true"
            "#,
        )
        .unwrap();
        assert_eq!(script.steps().len(), 1);
        assert_eq!(script.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn script_without_steps_is_rejected() {
        assert!(config_message("[config]\ntrace = false\n").contains("at least one [[step]]"));
    }

    #[test]
    fn trace_length_must_be_positive() {
        let msg = config_message("[config]\ntrace_length = 0\n[[step]]\nbash = \"true\"\n");
        assert!(msg.contains("trace_length"), "got {msg}");
    }

    #[test]
    fn empty_shell_is_rejected() {
        let msg = config_message("[config]\nshell = \" \"\n[[step]]\nbash = \"true\"\n");
        assert!(msg.contains("shell"), "got {msg}");
    }

    #[test]
    fn variable_names_must_be_identifiers() {
        let msg = config_message("[[step]]\nset = { name = \"\", value = \"x\" }\n");
        assert!(msg.contains("invalid variable name"), "got {msg}");

        let msg = config_message("[[step]]\nsexpand = { template = \"x\", into = \"a.b\" }\n");
        assert!(msg.contains("step 1 (Sexpand)"), "got {msg}");
    }

    #[test]
    fn unparseable_timeout_is_rejected() {
        let msg = config_message("[config]\ntimeout = \"soon\"\n[[step]]\nbash = \"true\"\n");
        assert!(msg.contains("invalid [config].timeout"), "got {msg}");
    }
}
