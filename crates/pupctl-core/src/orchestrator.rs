//! Agent run orchestration
//!
//! Ties the pieces together for one invocation: optional pre-run package
//! capture, the agent itself, output scrubbing, optional post-run capture
//! with the package delta appended, and exit code interpretation.

use crate::agent::{Agent, AgentError, AgentOutput, Mode};
use crate::config::RunConfig;
use crate::diff::{format_report, DiffSummary};
use crate::outcome::{ExitClassifier, Outcome};
use crate::sanitize::sanitize_with_stats;
use pupctl_inventory::{capture, InventoryError, InventorySnapshot, PackageDatabase};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a run before a report can be produced
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Package inventory failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Agent failed: {0}")]
    Agent(#[from] AgentError),
}

/// Structured result of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub changed: bool,
    pub failed: bool,
    /// Exit code reported to the caller; `0` for a successful run
    pub rc: i32,
    /// Classified exit code, present for `run`
    pub outcome: Option<Outcome>,
    /// Failure message
    pub msg: Option<String>,
    /// Scrubbed agent stdout, followed by the package delta when captured
    pub stdout: String,
    pub stderr: String,
    pub stdout_lines: Vec<String>,
}

/// Runs the agent for a [`RunConfig`]
pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    agent: &'a dyn Agent,
    packages: &'a dyn PackageDatabase,
    classifier: &'a dyn ExitClassifier,
}

impl<'a> Orchestrator<'a> {
    #[must_use]
    pub fn new(
        config: &'a RunConfig,
        agent: &'a dyn Agent,
        packages: &'a dyn PackageDatabase,
        classifier: &'a dyn ExitClassifier,
    ) -> Self {
        Self {
            config,
            agent,
            packages,
            classifier,
        }
    }

    /// Perform the configured run
    ///
    /// # Errors
    /// Returns an error if the agent cannot be started, or if the package
    /// database is unavailable before the run. A database failure after the
    /// run is reported inside the stdout instead.
    pub fn execute(&self) -> Result<RunReport, OrchestratorError> {
        let mode = self.config.mode;
        tracing::info!(%mode, "Starting agent");

        let before = if self.config.wants_inventory_diff() {
            Some(capture(self.packages)?)
        } else {
            None
        };

        if mode == Mode::Run {
            self.enable_before_run();
        }

        let output = self.agent.invoke(mode.agent_args())?;
        tracing::info!(rc = output.rc, "Agent finished");

        let (mut stdout, stats) = sanitize_with_stats(&output.stdout);
        tracing::debug!(
            removed = stats.removed,
            redacted = stats.redacted,
            "Sanitized agent output"
        );

        if let Some(before) = before {
            stdout.push_str(&self.package_delta(&before));
        }

        Ok(self.build_report(mode, output, stdout))
    }

    /// A disabled agent refuses `--test`, so `run` always enables first
    fn enable_before_run(&self) {
        match self.agent.invoke(Mode::Enable.agent_args()) {
            Ok(out) if out.rc != 0 => {
                tracing::warn!(rc = out.rc, "Enabling agent before run failed");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Enabling agent before run failed: {e}"),
        }
    }

    fn package_delta(&self, before: &InventorySnapshot) -> String {
        match capture(self.packages) {
            Ok(after) => {
                let report =
                    format_report(before.packages.as_slice(), after.packages.as_slice());
                let summary = DiffSummary::from_report(&report);
                tracing::info!("Package delta: {}", summary.one_line());
                report
            }
            Err(e) => {
                tracing::warn!("Skipping package delta: {e}");
                format!("Package delta unavailable: {e}\n")
            }
        }
    }

    fn build_report(&self, mode: Mode, output: AgentOutput, stdout: String) -> RunReport {
        let stdout_lines = stdout.lines().map(str::to_string).collect();

        if mode != Mode::Run {
            return RunReport {
                changed: true,
                failed: false,
                rc: output.rc,
                outcome: None,
                msg: None,
                stdout,
                stderr: output.stderr,
                stdout_lines,
            };
        }

        let outcome = self.classifier.classify(output.rc);
        let failed = outcome.failed();
        let msg = failed.then(|| format!("Puppet encountered errors. {stdout} {}", output.stderr));
        if failed {
            tracing::warn!(rc = output.rc, ?outcome, "Agent run reported errors");
        }

        RunReport {
            changed: outcome.changed(),
            failed,
            rc: if failed { output.rc } else { 0 },
            outcome: Some(outcome),
            msg,
            stdout,
            stderr: output.stderr,
            stdout_lines,
        }
    }
}
