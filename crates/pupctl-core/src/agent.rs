//! Configuration-management agent invocation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while starting the agent
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// What the agent is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Enable the agent, then perform a one-time run
    Run,
    /// Allow scheduled runs again
    Enable,
    /// Block scheduled and manual runs
    Disable,
}

impl Mode {
    /// Arguments for the agent invocation that carries out this mode
    #[must_use]
    pub fn agent_args(self) -> &'static [&'static str] {
        match self {
            Mode::Run => &["agent", "--test", "--color", "0"],
            Mode::Enable => &["agent", "--enable"],
            Mode::Disable => &["agent", "--disable"],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Run => "run",
            Mode::Enable => "enable",
            Mode::Disable => "disable",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" => Ok(Mode::Run),
            "enable" | "enabled" => Ok(Mode::Enable),
            "disable" | "disabled" => Ok(Mode::Disable),
            _ => Err(format!(
                "value of state must be one of: enabled, disabled, run, got: {s}"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured result of one agent process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Exit code; `-1` when the process was killed by a signal
    pub rc: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Something that can run agent subcommands
pub trait Agent {
    /// Run the agent with `args` and wait for it to finish
    fn invoke(&self, args: &[&str]) -> Result<AgentOutput, AgentError>;
}

/// The puppet executable
#[derive(Debug, Clone)]
pub struct PuppetAgent {
    /// Path or name of the puppet binary
    pub binary: PathBuf,
}

impl Default for PuppetAgent {
    fn default() -> Self {
        Self::new("puppet")
    }
}

impl PuppetAgent {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Agent for PuppetAgent {
    fn invoke(&self, args: &[&str]) -> Result<AgentOutput, AgentError> {
        tracing::debug!(binary = %self.binary.display(), ?args, "Invoking agent");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| AgentError::Spawn {
                program: self.binary.display().to_string(),
                source,
            })?;

        Ok(AgentOutput {
            rc: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
