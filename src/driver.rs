// src/driver.rs

//! Process-level reaction to a failed chain.
//!
//! This is the only place that terminates the process. The core hands a
//! failed [`Outcome`] to the step's halt handler; [`exit_process`] is the
//! handler installed by `Step::begin`.

use tracing::error;

use crate::step::Outcome;

/// Exit with status 1 if `outcome` is a failure; otherwise do nothing.
///
/// The failure itself has already been reported through the step's sink.
pub fn exit_process(outcome: &Outcome) {
    if let Some(status) = exit_status(outcome) {
        error!(target: "stepwise::driver", status, "exiting");
        std::process::exit(status);
    }
}

fn exit_status(outcome: &Outcome) -> Option<i32> {
    (!outcome.is_success()).then_some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_exit() {
        let done = Outcome::Completed {
            description: "build".to_string(),
        };
        let failed = Outcome::Failed {
            description: "build".to_string(),
            status: 3,
            cause: None,
        };
        assert_eq!(exit_status(&done), None);
        assert_eq!(exit_status(&failed), Some(1));
    }
}
