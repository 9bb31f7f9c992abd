// src/expand.rs

//! Template expansion against a step's [`Environment`].
//!
//! Templates use Handlebars syntax in strict mode with HTML escaping turned
//! off. The data visible to a template is a [`Scope`]:
//!
//! - `{{var.name}}`, `{{var.user.home}}`: variables, including nested fields
//! - `{{flag.name}}`: startup flags
//! - `{{arg.[0]}}` or `{{lookup arg 0}}`: positional arguments
//!
//! Referencing anything that is not bound is a render error, never a panic.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::env::{Environment, Flags, Variables};
use crate::step::Step;

const TEMPLATE_NAME: &str = "expando";

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("template syntax error: {0}")]
    Syntax(#[from] handlebars::TemplateError),

    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Read-only view of an environment handed to the template engine.
#[derive(Debug, Serialize)]
pub struct Scope<'a> {
    pub var: &'a Variables,
    pub flag: &'a Flags,
    pub arg: &'a [String],
}

impl<'a> Scope<'a> {
    pub fn of(env: &'a Environment) -> Self {
        Self {
            var: env.vars(),
            flag: env.flags(),
            arg: env.args(),
        }
    }
}

/// Render `source` against `env`.
///
/// Pure: the environment is only read, and the same template and
/// environment always give the same text.
pub fn expando(source: &str, env: &Environment) -> Result<String, ExpandError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string(TEMPLATE_NAME, source)?;

    let rendered = registry.render(TEMPLATE_NAME, &Scope::of(env))?;
    Ok(rendered)
}

impl Step {
    /// Render `template` and return the text.
    ///
    /// Returns an empty string when the step is already failed or the
    /// template does not render (the step is then failed).
    pub fn sexpand(&mut self, template: &str) -> String {
        let mut expanded = String::new();
        self.operate("Sexpand", &[template], |step| {
            if let Some(text) = step.render(template) {
                expanded = text;
            }
        });
        expanded
    }

    /// Render `template` and write exactly the rendered bytes to `filename`,
    /// creating or truncating it.
    pub fn expand(&mut self, template: &str, filename: impl AsRef<Path>) -> &mut Self {
        let path = filename.as_ref();
        let shown = path.display().to_string();
        self.operate("Expand", &[template, shown.as_str()], |step| {
            let Some(text) = step.render(template) else {
                return;
            };
            if let Err(err) = step.filesystem().write(path, text.as_bytes()) {
                step.fail_err(err);
            }
        })
    }

    /// Expand `template` against the current environment, failing the step
    /// on error.
    pub(crate) fn render(&mut self, template: &str) -> Option<String> {
        match expando(template, self.env()) {
            Ok(text) => Some(text),
            Err(err) => {
                self.fail_err(err);
                None
            }
        }
    }
}
