//! Agent output scrubbing
//!
//! Rules run in a fixed order, line by line and case-insensitively:
//! informational lines are dropped, the one-time `--listen` notice is
//! dropped, and any line mentioning `default_db` or `password` is replaced
//! wholesale by [`REDACTION_MARKER`]. Surviving lines keep their order.

use regex::Regex;
use std::sync::LazyLock;

/// Replacement for any line that may carry a secret
pub const REDACTION_MARKER: &str = "************Password filtered out************";

static INFO_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^Info:.*(?:\n|$)").expect("static regex"));

static LISTEN_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^Notice: Ignoring --listen on onetime run(?:\r?\n|$)").expect("static regex")
});

// Over-matching is accepted: "password policy" lines are redacted too.
static SECRET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*(?:default_db|password).*").expect("static regex"));

/// Counts of what [`sanitize_with_stats`] touched
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Lines dropped as noise
    pub removed: usize,
    /// Lines replaced by the redaction marker
    pub redacted: usize,
}

/// Scrub raw agent output for display
#[must_use]
pub fn sanitize(raw: &str) -> String {
    sanitize_with_stats(raw).0
}

/// Scrub raw agent output, also reporting how many lines were touched
#[must_use]
pub fn sanitize_with_stats(raw: &str) -> (String, SanitizeStats) {
    let mut stats = SanitizeStats::default();
    let mut text = raw.to_string();

    for noise in [&*INFO_LINE, &*LISTEN_NOTICE] {
        stats.removed += noise.find_iter(&text).count();
        text = noise.replace_all(&text, "").into_owned();
    }

    stats.redacted = SECRET_LINE.find_iter(&text).count();
    text = SECRET_LINE.replace_all(&text, REDACTION_MARKER).into_owned();

    (text, stats)
}
