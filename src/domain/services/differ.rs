//! Differ Domain Service
//!
//! Line diff between two pretty-printed snapshot states, summarized for the
//! development log.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Line counts of a state change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub additions: usize,
    pub deletions: usize,
    /// Inserted lines, trimmed, in order
    pub inserted: Vec<String>,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}, -{}", self.additions, self.deletions)
    }
}

/// Compare `old` and `new` line by line
pub fn summarize(old: &str, new: &str) -> DiffSummary {
    let diff = TextDiff::from_lines(old, new);
    let mut summary = DiffSummary::default();

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => summary.deletions += 1,
            ChangeTag::Insert => {
                summary.additions += 1;
                summary.inserted.push(change.value().trim().to_string());
            }
            ChangeTag::Equal => {}
        }
    }

    summary
}
