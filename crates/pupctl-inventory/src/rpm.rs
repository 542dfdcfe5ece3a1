//! rpm-backed package database

use crate::error::{InventoryError, InventoryResult};
use crate::inventory::{PackageDatabase, PackageRecord};
use std::path::PathBuf;
use std::process::Command;

/// Query format handed to `rpm -qa`; rpm expands the escapes itself
const QUERY_FORMAT: &str = "%{NAME}\\t%{VERSION}\\t%{RELEASE}\\n";

/// Package database read through the `rpm` command
#[derive(Debug, Clone)]
pub struct RpmDatabase {
    /// Path or name of the rpm binary
    pub binary: PathBuf,
}

impl Default for RpmDatabase {
    fn default() -> Self {
        Self::new("rpm")
    }
}

impl RpmDatabase {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl PackageDatabase for RpmDatabase {
    fn installed(&self) -> InventoryResult<Vec<PackageRecord>> {
        let output = Command::new(&self.binary)
            .args(["-qa", "--queryformat", QUERY_FORMAT])
            .output()
            .map_err(|e| {
                InventoryError::DatabaseUnavailable(format!(
                    "failed to run {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InventoryError::DatabaseUnavailable(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        parse_query_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse tab-separated `name version release` rows, skipping blank lines
fn parse_query_output(stdout: &str) -> InventoryResult<Vec<PackageRecord>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(name), Some(version), Some(release), None) if !name.is_empty() => {
                    Ok(PackageRecord {
                        name: name.to_string(),
                        version: version.to_string(),
                        release: release.to_string(),
                    })
                }
                _ => Err(InventoryError::MalformedRecord(line.to_string())),
            }
        })
        .collect()
}
