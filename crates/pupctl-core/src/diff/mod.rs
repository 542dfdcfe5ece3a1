//! Package delta between two inventory snapshots
//!
//! The delta is position-sensitive: snapshots are compared as ordered line
//! sequences, so a package that merely moved in the enumeration can show up
//! as a removal plus an addition.

pub mod compute;
pub mod display;

pub use compute::unified_lines;
pub use display::{format_report, DiffSummary};

/// Rule printed above and below the delta
pub const SEPARATOR: &str =
    "================================================================================\n";

/// Title line of the delta report
pub const REPORT_HEADER: &str = "This is the RPM delta\n";
