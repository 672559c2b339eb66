//! Aggregation of extracted facts into ranked and deduplicated tables.
//!
//! All operations are pure: the same input sequence always yields the same
//! output, independent of any previous call.

mod dedup;
mod frequency;
mod report;

pub use dedup::{dedup_rows, distinct_sample};
pub use frequency::{count_occurrences, top_n, RankedEntry};
pub use report::{AggregateCounts, AggregateReport};
