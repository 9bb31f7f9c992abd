// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{RawScriptFile, Script};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Load a script file from a given path and return the raw `RawScriptFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScriptFile> {
    load_with(&RealFileSystem, path.as_ref())
}

/// Like [`load_from_path`] but reads through `fs`.
pub fn load_with(fs: &dyn FileSystem, path: &Path) -> Result<RawScriptFile> {
    let contents = fs.read_to_string(path)?;
    let script: RawScriptFile = toml::from_str(&contents)?;
    Ok(script)
}

/// Load a script file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks steps, variable names, `trace_length`, shell and timeout.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Script> {
    let raw = load_from_path(path)?;
    Script::try_from(raw)
}

/// `Stepwise.toml` in the current working directory.
pub fn default_script_path() -> PathBuf {
    PathBuf::from("Stepwise.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StepError;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn reads_through_the_given_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file("Stepwise.toml", "[[step]]\nbash = \"true\"\n");

        let raw = load_with(&fs, &default_script_path()).unwrap();
        assert_eq!(raw.step.len(), 1);
    }

    #[test]
    fn missing_file_and_bad_toml_are_reported() {
        let fs = MockFileSystem::new();
        let err = load_with(&fs, Path::new("absent.toml")).unwrap_err();
        assert!(matches!(err, StepError::Other(_)), "got {err:?}");

        fs.add_file("bad.toml", "[[step]\n");
        let err = load_with(&fs, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, StepError::TomlError(_)), "got {err:?}");
    }
}
