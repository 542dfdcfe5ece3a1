//! pupctl core - agent orchestration, output sanitizing, package delta
//!
//! This crate runs a configuration-management agent, scrubs its output,
//! and reports which installed packages changed across the run.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod agent;
pub mod config;
pub mod diff;
pub mod orchestrator;
pub mod outcome;
pub mod sanitize;

pub use pupctl_inventory;

pub use agent::{Agent, AgentError, AgentOutput, Mode, PuppetAgent};
pub use config::{ConfigError, ConfigFile, RunConfig};
pub use diff::{format_report, DiffSummary};
pub use orchestrator::{Orchestrator, OrchestratorError, RunReport};
pub use outcome::{ExitClassifier, ExitCodeMap, Outcome};
pub use sanitize::{sanitize, REDACTION_MARKER};
