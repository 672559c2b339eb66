//! Frequency counting and top-N ranking.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of a ranked frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedEntry {
    pub value: String,
    pub count: usize,
}

impl RankedEntry {
    #[must_use]
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Count occurrences, keyed in order of first appearance.
pub fn count_occurrences<I, S>(values: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in values {
        let value = value.as_ref();
        if let Some(count) = counts.get_mut(value) {
            *count += 1;
        } else {
            counts.insert(value.to_string(), 1);
        }
    }
    counts
}

/// Rank values by occurrence count and keep the first `n`.
///
/// Sorting is descending by count; equal counts keep the order in which the
/// values first appeared.
pub fn top_n<I, S>(values: I, n: usize) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ranked: Vec<RankedEntry> = count_occurrences(values)
        .into_iter()
        .map(|(value, count)| RankedEntry { value, count })
        .collect();
    // `sort_by` is stable, so first-seen order survives among ties.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}
