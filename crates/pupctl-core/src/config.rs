//! Run configuration
//!
//! A [`RunConfig`] is built once at startup and handed to the
//! orchestrator. Settings come from built-in defaults, then an optional
//! JSON [`ConfigFile`], then whatever the caller overrides on top.

use crate::agent::Mode;
use crate::outcome::ExitCodeMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up under the user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors while loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk settings; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Capture the package delta around `run`
    pub package_diff: Option<bool>,
    /// Agent executable
    pub agent_bin: Option<PathBuf>,
    /// rpm executable
    pub rpm_bin: Option<PathBuf>,
    /// Exit code table for the agent
    pub exit_codes: Option<ExitCodeMap>,
}

impl ConfigFile {
    /// Load a config file from `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default location: `<config_dir>/pupctl/config.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pupctl").join(CONFIG_FILE_NAME))
    }

    /// Load the explicit file if given, else the default file if it exists
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load(&path).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Everything the orchestrator needs for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub mode: Mode,
    /// Capture the package delta around `run`
    pub with_inventory_diff: bool,
    pub agent_bin: PathBuf,
    pub rpm_bin: PathBuf,
    pub exit_codes: ExitCodeMap,
}

impl RunConfig {
    /// Defaults for `mode`
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            with_inventory_diff: true,
            agent_bin: PathBuf::from("puppet"),
            rpm_bin: PathBuf::from("rpm"),
            exit_codes: ExitCodeMap::default(),
        }
    }

    /// Defaults for `mode` overridden by the values set in `file`
    #[must_use]
    pub fn from_file(mode: Mode, file: &ConfigFile) -> Self {
        let mut config = Self::new(mode);
        if let Some(package_diff) = file.package_diff {
            config.with_inventory_diff = package_diff;
        }
        if let Some(agent_bin) = &file.agent_bin {
            config.agent_bin.clone_from(agent_bin);
        }
        if let Some(rpm_bin) = &file.rpm_bin {
            config.rpm_bin.clone_from(rpm_bin);
        }
        if let Some(exit_codes) = file.exit_codes {
            config.exit_codes = exit_codes;
        }
        config
    }

    /// Turn the package delta on or off
    #[must_use]
    pub fn inventory_diff(mut self, enabled: bool) -> Self {
        self.with_inventory_diff = enabled;
        self
    }

    /// Whether this run should capture the package delta
    #[must_use]
    pub fn wants_inventory_diff(&self) -> bool {
        self.with_inventory_diff && self.mode == Mode::Run
    }
}
