//! Zero-context unified diff over ordered identifier lists

use similar::{ChangeTag, DiffOp, TextDiff};
use std::ops::Range;

/// Generate a unified diff with no context lines between two sequences
///
/// Each element is one line. Emitted lines carry no terminator. The output
/// includes the `---`/`+++` file headers and one `@@` header per hunk;
/// within a hunk removals precede insertions. Identical inputs produce an
/// empty list.
#[must_use]
pub fn unified_lines<S: AsRef<str>>(before: &[S], after: &[S]) -> Vec<String> {
    let old: Vec<&str> = before.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = after.iter().map(AsRef::as_ref).collect();
    let diff = TextDiff::from_slices(old.as_slice(), new.as_slice());

    let groups = diff.grouped_ops(0);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut output = vec!["--- before".to_string(), "+++ after".to_string()];
    for group in &groups {
        output.push(hunk_header(group));
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => continue,
                };
                output.push(format!("{sign}{}", change.value()));
            }
        }
    }

    output
}

fn hunk_header(group: &[DiffOp]) -> String {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return "@@ -0,0 +0,0 @@".to_string();
    };
    let old = first.old_range().start..last.old_range().end;
    let new = first.new_range().start..last.new_range().end;
    format!("@@ -{} +{} @@", format_range(old), format_range(new))
}

/// Render a range the way unified diff headers do (1-based, length elided when 1)
fn format_range(range: Range<usize>) -> String {
    let start = range.start + 1;
    match range.len() {
        0 => format!("{},0", range.start),
        1 => start.to_string(),
        len => format!("{start},{len}"),
    }
}
