// src/types.rs

//! Small value types shared by the CLI and the script loader.

use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

/// A `name=value` pair passed with `--flag`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagAssignment {
    pub name: String,
    pub value: Value,
}

impl FromStr for FlagAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid flag '{s}' (expected NAME=VALUE)"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("invalid flag '{s}': empty name"));
        }
        // JSON scalars and arrays keep their type; anything else is text.
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;
    let unit = unit_part.trim().to_lowercase();

    let seconds_per = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        _ => {
            return Err(format!(
                "unsupported duration unit '{unit}'; expected ms, s, m, or h"
            ));
        }
    };
    value
        .checked_mul(seconds_per)
        .map(Duration::from_secs)
        .ok_or_else(|| "duration too large".to_string())
}
