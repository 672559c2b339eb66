//! Per-identifier lookup orchestration.
//!
//! Each identifier gets its own bounded lookup. A lookup that times out or
//! fails is recorded and the run moves on; one slow identifier never holds up
//! the rest.

use super::stats::{duration_serde, ScanStats};
use super::tool::{LookupError, LookupTool};
use crate::config::ScanConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Final state of one identifier's lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success {
        output: String,
    },
    TimedOut {
        #[serde(with = "duration_serde")]
        after: Duration,
    },
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl LookupOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short label for tables and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "ok",
            Self::TimedOut { .. } => "timed out",
            Self::Failed { .. } => "failed",
        }
    }
}

impl From<LookupError> for LookupOutcome {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Timeout { after } => Self::TimedOut { after },
            LookupError::Failed { exit_code, stderr } => Self::Failed { exit_code, stderr },
            LookupError::Spawn(message) => Self::Failed {
                exit_code: None,
                stderr: message,
            },
        }
    }
}

/// Outcome for a single identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub identifier: String,
    pub outcome: LookupOutcome,
    /// Number of times the tool was invoked
    pub attempts: u32,
}

/// Results of a whole run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub results: Vec<LookupResult>,
    pub stats: ScanStats,
}

impl ScanReport {
    /// Identifiers whose lookup succeeded, with the tool output.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            LookupOutcome::Success { output } => Some((r.identifier.as_str(), output.as_str())),
            _ => None,
        })
    }
}

/// Drives a [`LookupTool`] over a list of identifiers.
pub struct ScanOrchestrator<T: LookupTool> {
    tool: T,
    timeout: Duration,
    workers: usize,
    max_retries: u32,
}

impl<T: LookupTool> ScanOrchestrator<T> {
    /// Sequential orchestrator with no retries.
    pub const fn new(tool: T, timeout: Duration) -> Self {
        Self {
            tool,
            timeout,
            workers: 1,
            max_retries: 0,
        }
    }

    /// Orchestrator configured from the `scan` config section.
    pub const fn from_config(tool: T, config: &ScanConfig) -> Self {
        Self {
            tool,
            timeout: config.timeout(),
            workers: config.workers,
            max_retries: config.max_retries,
        }
    }

    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Retry failed lookups up to `max_retries` extra times. Timeouts are
    /// never retried.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub const fn tool(&self) -> &T {
        &self.tool
    }

    /// Look up every identifier. The result list has one entry per input
    /// identifier, in input order.
    pub fn run(&self, identifiers: &[String]) -> ScanReport {
        let start = Instant::now();
        tracing::info!(
            "Looking up {} identifiers with {} (timeout {:?}, {} workers)",
            identifiers.len(),
            self.tool.name(),
            self.timeout,
            self.workers.max(1)
        );

        let results = if self.workers > 1 && identifiers.len() > 1 {
            self.run_parallel(identifiers)
        } else {
            self.run_sequential(identifiers)
        };

        let mut stats = ScanStats {
            total: identifiers.len(),
            ..ScanStats::new()
        };
        for result in &results {
            match result.outcome {
                LookupOutcome::Success { .. } => stats.succeeded += 1,
                LookupOutcome::TimedOut { .. } => stats.timed_out += 1,
                LookupOutcome::Failed { .. } => stats.failed += 1,
            }
            stats.retries += result.attempts.saturating_sub(1) as usize;
        }
        debug_assert_eq!(stats.completed(), stats.total);
        stats.duration = start.elapsed();
        stats.log_summary();

        ScanReport { results, stats }
    }

    fn run_sequential(&self, identifiers: &[String]) -> Vec<LookupResult> {
        identifiers.iter().map(|id| self.lookup_one(id)).collect()
    }

    fn run_parallel(&self, identifiers: &[String]) -> Vec<LookupResult> {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(|| {
                identifiers
                    .par_iter()
                    .map(|id| self.lookup_one(id))
                    .collect()
            }),
            Err(e) => {
                tracing::warn!("Could not start {} lookup workers, running sequentially: {e}", self.workers);
                self.run_sequential(identifiers)
            }
        }
    }

    fn lookup_one(&self, identifier: &str) -> LookupResult {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let outcome = match self.tool.lookup(identifier, self.timeout) {
                Ok(output) => LookupOutcome::Success { output },
                Err(err) => {
                    tracing::warn!("Lookup for {identifier} (attempt {attempts}): {err}");
                    LookupOutcome::from(err)
                }
            };

            let retry = matches!(outcome, LookupOutcome::Failed { .. })
                && attempts <= self.max_retries;
            if !retry {
                return LookupResult {
                    identifier: identifier.to_string(),
                    outcome,
                    attempts,
                };
            }
            tracing::debug!("Retrying lookup for {identifier}");
        }
    }
}
