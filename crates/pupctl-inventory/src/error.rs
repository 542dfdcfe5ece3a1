//! Error types for inventory capture

use thiserror::Error;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur while capturing an inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The package database could not be opened or queried
    #[error("Package database unavailable: {0}")]
    DatabaseUnavailable(String),

    /// A database row did not carry name, version and release
    #[error("Malformed package record: {0:?}")]
    MalformedRecord(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
