//! Order-preserving deduplication of table rows.

use indexmap::IndexSet;
use std::hash::Hash;

/// Drop rows equal to an earlier row, then keep the first `n`.
///
/// The first occurrence of each row wins and relative order is preserved, so
/// applying this twice gives the same result as applying it once.
pub fn dedup_rows<I, T>(rows: I, n: usize) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut seen: IndexSet<T> = IndexSet::new();
    for row in rows {
        if seen.len() == n {
            break;
        }
        seen.insert(row);
    }
    seen.into_iter().collect()
}

/// First `n` distinct strings, in order of first appearance.
pub fn distinct_sample<I, S>(values: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dedup_rows(values.into_iter().map(|v| v.as_ref().to_string()), n)
}
