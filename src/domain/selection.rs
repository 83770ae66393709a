//! Exclusion input handling for the change list.
//!
//! Malformed exclusion input never fails a run: bad tokens are collected so
//! the caller can warn about them, and otherwise ignored.

use std::collections::BTreeSet;

use crate::domain::change::ChangeEntry;

/// Result of parsing one line of exclusion input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exclusions {
    /// Valid 1-based indices to leave out of the commit
    pub indices: BTreeSet<usize>,
    /// Tokens that were not a number in `1..=count`
    pub ignored: Vec<String>,
}

/// Parse comma-separated indices against a list of `count` entries.
///
/// Empty input excludes nothing.
pub fn parse_exclusions(input: &str, count: usize) -> Exclusions {
    let mut exclusions = Exclusions::default();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<usize>() {
            Ok(index) if (1..=count).contains(&index) => {
                exclusions.indices.insert(index);
            }
            _ => exclusions.ignored.push(token.to_string()),
        }
    }

    exclusions
}

/// Entries whose index is not excluded, in their original order
pub fn remaining<'a>(
    entries: &'a [ChangeEntry],
    excluded: &BTreeSet<usize>,
) -> Vec<&'a ChangeEntry> {
    entries
        .iter()
        .filter(|entry| !excluded.contains(&entry.display_index))
        .collect()
}
