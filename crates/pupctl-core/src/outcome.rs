//! Exit code classification
//!
//! With `--detailed-exitcodes` puppet folds "something changed" and
//! "something failed" into its exit code. The mapping is a value so other
//! agents, or tests, can supply their own.

use serde::{Deserialize, Serialize};

/// Result of an agent run as reported by its exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Unchanged,
    Changed,
    ChangedWithErrors,
    Error,
}

impl Outcome {
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Outcome::Changed | Outcome::ChangedWithErrors)
    }

    #[must_use]
    pub fn failed(self) -> bool {
        matches!(self, Outcome::ChangedWithErrors | Outcome::Error)
    }
}

/// Maps a process exit code to an [`Outcome`]
pub trait ExitClassifier {
    fn classify(&self, rc: i32) -> Outcome;
}

/// Table of exit codes, defaulting to puppet's detailed exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitCodeMap {
    pub unchanged: i32,
    pub changed: i32,
    pub errors: i32,
    pub changed_with_errors: i32,
}

impl Default for ExitCodeMap {
    fn default() -> Self {
        Self {
            unchanged: 0,
            changed: 2,
            errors: 4,
            changed_with_errors: 6,
        }
    }
}

impl ExitClassifier for ExitCodeMap {
    fn classify(&self, rc: i32) -> Outcome {
        if rc == self.unchanged {
            Outcome::Unchanged
        } else if rc == self.changed {
            Outcome::Changed
        } else if rc == self.changed_with_errors {
            Outcome::ChangedWithErrors
        } else {
            // `errors` and anything unmapped
            Outcome::Error
        }
    }
}
