// src/exec/bash.rs

use tracing::Level;

use crate::step::Step;

impl Step {
    /// Render `command` and run it through the shell, streaming its output.
    ///
    /// Template errors, spawn failures, non-zero exits, signals and timeouts
    /// all fail the step.
    pub fn bash(&mut self, command: &str) -> &mut Self {
        self.operate("Bash", &[command], |step| {
            let Some(rendered) = step.render(command) else {
                return;
            };
            step.log(Level::DEBUG, &format!("bash -c '{rendered}'"));
            if let Err(err) = step.shell_mut().run(&rendered) {
                step.fail_err(err);
            }
        })
    }

    /// Like [`Step::bash`] but returns the command's stdout instead of
    /// streaming it. Returns an empty string when skipped or failed.
    pub fn sbash(&mut self, command: &str) -> String {
        let mut stdout = String::new();
        self.operate("Sbash", &[command], |step| {
            let Some(rendered) = step.render(command) else {
                return;
            };
            step.log(Level::DEBUG, &format!("bash -c '{rendered}'"));
            match step.shell_mut().capture(&rendered) {
                Ok(out) => stdout = out,
                Err(err) => {
                    step.fail_err(err);
                }
            }
        });
        stdout
    }
}
