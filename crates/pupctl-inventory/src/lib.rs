//! pupctl inventory - installed package snapshots
//!
//! This crate captures read-only, ordered snapshots of the packages
//! installed on a host. The rpm database is queried through the
//! [`PackageDatabase`] seam so captures can be driven by fakes in tests.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod error;
pub mod inventory;
pub mod rpm;

pub use error::{InventoryError, InventoryResult};
pub use inventory::{capture, InventorySnapshot, PackageDatabase, PackageId, PackageRecord};
pub use rpm::RpmDatabase;
