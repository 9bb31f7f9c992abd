// src/config/mod.rs

//! Script loading and validation for the `stepwise` binary.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a script file from disk (`loader.rs`).
//! - Validate it into a [`Script`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_script_path, load_and_validate, load_from_path, load_with};
pub use model::{ConfigSection, RawScriptFile, Script, StepConfig};
