//! Delta report rendering

use super::compute::unified_lines;
use super::{REPORT_HEADER, SEPARATOR};

/// Keep only lines that are a sign immediately followed by a letter
///
/// Drops `---`/`+++` file headers, `@@` hunk headers and entries that do
/// not start with a letter.
fn is_package_change(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('-' | '+')) && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Render the package delta between two snapshots
///
/// The report is the separator, the header line, one `+name` / `-name` line
/// per changed package, then the separator again. Identical inputs yield a
/// report with an empty body.
#[must_use]
pub fn format_report<S: AsRef<str>>(before: &[S], after: &[S]) -> String {
    let mut body = String::new();
    for line in unified_lines(before, after) {
        if is_package_change(&line) {
            body.push_str(&line);
            body.push('\n');
        }
    }

    let mut report = String::with_capacity(SEPARATOR.len() * 2 + REPORT_HEADER.len() + body.len());
    report.push_str(SEPARATOR);
    report.push_str(REPORT_HEADER);
    report.push_str(&body);
    report.push_str(SEPARATOR);
    report
}

/// Summary statistics for a delta report
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    /// Packages present only after the run
    pub added: usize,
    /// Packages present only before the run
    pub removed: usize,
}

impl DiffSummary {
    /// Count the change lines of a rendered report
    #[must_use]
    pub fn from_report(report: &str) -> Self {
        let mut summary = Self::default();
        for line in report.lines().filter(|l| is_package_change(l)) {
            if line.starts_with('+') {
                summary.added += 1;
            } else {
                summary.removed += 1;
            }
        }
        summary
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    /// Format as a one-line summary
    #[must_use]
    pub fn one_line(&self) -> String {
        format!("{} added, {} removed", self.added, self.removed)
    }
}
