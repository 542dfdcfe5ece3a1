//! Snapshot types for installed packages

use crate::error::InventoryResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one installed package: `name-version-release`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Join the package fields with `-`
    #[must_use]
    pub fn new(name: &str, version: &str, release: &str) -> Self {
        Self(format!("{name}-{version}-{release}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One raw row returned by a package database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub release: String,
}

impl PackageRecord {
    #[must_use]
    pub fn id(&self) -> PackageId {
        PackageId::new(&self.name, &self.version, &self.release)
    }
}

/// Source of installed package records
///
/// Implementations return rows in the order the underlying database
/// enumerates them. Queries must not modify host state.
pub trait PackageDatabase {
    /// List every installed package
    fn installed(&self) -> InventoryResult<Vec<PackageRecord>>;
}

/// Ordered capture of installed packages at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Packages in database enumeration order
    pub packages: Vec<PackageId>,
    /// When the capture was taken
    pub captured_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Build a snapshot from raw records, keeping their order
    #[must_use]
    pub fn from_records(records: &[PackageRecord]) -> Self {
        Self {
            packages: records.iter().map(PackageRecord::id).collect(),
            captured_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageId> {
        self.packages.iter()
    }

    /// Borrow the identifiers as plain strings, in order
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.packages.iter().map(PackageId::as_str).collect()
    }
}

/// Capture the installed packages from `db`
///
/// # Errors
/// Returns `DatabaseUnavailable` if the database cannot be queried
pub fn capture(db: &dyn PackageDatabase) -> InventoryResult<InventorySnapshot> {
    let records = db.installed()?;
    let snapshot = InventorySnapshot::from_records(&records);
    tracing::debug!(packages = snapshot.len(), "Captured package inventory");
    Ok(snapshot)
}
