//! Lookup run statistics.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters from one orchestrated lookup run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Identifiers submitted
    pub total: usize,
    /// Lookups that returned output
    pub succeeded: usize,
    /// Lookups abandoned at the timeout
    pub timed_out: usize,
    /// Lookups that exited unsuccessfully or could not start
    pub failed: usize,
    /// Extra attempts made after failures
    pub retries: usize,
    /// Wall-clock duration of the run
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScanStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every submitted identifier has exactly one outcome.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.succeeded + self.timed_out + self.failed
    }

    #[must_use]
    pub const fn has_problems(&self) -> bool {
        self.timed_out > 0 || self.failed > 0
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "Lookup complete: {} identifiers, {} succeeded, {} timed out, {} failed, \
             {} retries in {:?}",
            self.total,
            self.succeeded,
            self.timed_out,
            self.failed,
            self.retries,
            self.duration
        );
    }
}

/// Serde support for Duration
pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
