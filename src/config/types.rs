//! Configuration types for sbom-digest operations.
//!
//! Provides structured configuration for the summary, vulnerability and scan
//! commands.

use super::defaults::{
    DEFAULT_API_KEY_ENV, DEFAULT_LOOKUP_ARGS, DEFAULT_LOOKUP_PROGRAM, DEFAULT_LOOKUP_TIMEOUT_SECS,
    DEFAULT_PURLS_FILE, DEFAULT_SHORT_TABLE_LIMIT, DEFAULT_TABLE_LIMIT,
};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags override values loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Aggregate table sizes
    pub summary: SummaryConfig,
    /// External vulnerability lookup settings
    pub scan: ScanConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Start from an existing configuration, typically one loaded from a file.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Set the output format.
    pub fn output_format(mut self, format: Option<ReportFormat>) -> Self {
        if let Some(format) = format {
            self.config.output.format = format;
        }
        self
    }

    /// Disable colored output. A `false` here never re-enables color set off in the file.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color |= no_color;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        if file.is_some() {
            self.config.output.file = file;
        }
        self
    }

    /// Enable fail-on-vulnerability mode.
    pub const fn fail_on_vuln(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_vuln |= fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet |= quiet;
        self
    }

    /// Override the lookup program.
    pub fn scan_program(mut self, program: Option<String>) -> Self {
        if let Some(program) = program {
            self.config.scan.program = program;
        }
        self
    }

    /// Override the per-lookup timeout.
    pub fn scan_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.config.scan.timeout_secs = secs;
        }
        self
    }

    /// Override the number of lookup workers.
    pub fn scan_workers(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.config.scan.workers = workers;
        }
        self
    }

    /// Override the identifier list path.
    pub fn purls_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.config.scan.purls_file = path;
        }
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Row limits of the aggregate tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SummaryConfig {
    /// License distribution table size
    #[schemars(range(min = 1))]
    pub license_limit: usize,
    /// Cryptographic algorithm table size
    #[schemars(range(min = 1))]
    pub crypto_limit: usize,
    /// Quality score table size
    #[schemars(range(min = 1))]
    pub quality_limit: usize,
    /// Deduplicated repository health table size
    #[schemars(range(min = 1))]
    pub health_limit: usize,
    /// Deduplicated component metadata table size
    #[schemars(range(min = 1))]
    pub metadata_limit: usize,
    /// Component usage summary size
    #[schemars(range(min = 1))]
    pub component_limit: usize,
    /// Provenance summary size
    #[schemars(range(min = 1))]
    pub provenance_limit: usize,
    /// Number of distinct copyright strings sampled
    #[schemars(range(min = 1))]
    pub copyright_sample: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            license_limit: DEFAULT_TABLE_LIMIT,
            crypto_limit: DEFAULT_TABLE_LIMIT,
            quality_limit: DEFAULT_TABLE_LIMIT,
            health_limit: DEFAULT_TABLE_LIMIT,
            metadata_limit: DEFAULT_TABLE_LIMIT,
            component_limit: DEFAULT_SHORT_TABLE_LIMIT,
            provenance_limit: DEFAULT_SHORT_TABLE_LIMIT,
            copyright_sample: DEFAULT_SHORT_TABLE_LIMIT,
        }
    }
}

/// External vulnerability lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Lookup program to run once per package identifier
    pub program: String,
    /// Program arguments; `{purl}` is replaced by the identifier
    pub args: Vec<String>,
    /// Wall-clock limit for a single lookup, in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Environment variable holding the access credential
    pub api_key_env: String,
    /// File the identifier list is written to before scanning
    pub purls_file: PathBuf,
    /// Concurrent lookups (1 runs strictly in order)
    #[schemars(range(min = 1))]
    pub workers: usize,
    /// Extra attempts after a failed lookup; timeouts are never retried
    pub max_retries: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_LOOKUP_PROGRAM.to_string(),
            args: DEFAULT_LOOKUP_ARGS.iter().map(|a| (*a).to_string()).collect(),
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            purls_file: PathBuf::from(DEFAULT_PURLS_FILE),
            workers: 1,
            max_retries: 0,
        }
    }
}

impl ScanConfig {
    /// Per-lookup timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 if any vulnerability is found
    pub fail_on_vuln: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.summary.license_limit, 10);
        assert_eq!(config.summary.provenance_limit, 5);
        assert_eq!(config.scan.timeout(), Duration::from_secs(10));
        assert_eq!(config.scan.workers, 1);
        assert_eq!(config.scan.max_retries, 0);
        assert_eq!(config.scan.purls_file, PathBuf::from("purls.txt"));
        assert!(config.scan.args.iter().any(|a| a == "{purl}"));
    }

    #[test]
    fn test_builder_overrides_only_given_values() {
        let base = AppConfig {
            output: OutputConfig {
                file: Some(PathBuf::from("summary.md")),
                ..OutputConfig::default()
            },
            ..AppConfig::default()
        };
        let config = AppConfigBuilder::from_config(base)
            .output_file(None)
            .scan_timeout_secs(Some(3))
            .scan_workers(None)
            .fail_on_vuln(true)
            .build();
        assert_eq!(config.output.file, Some(PathBuf::from("summary.md")));
        assert_eq!(config.scan.timeout_secs, 3);
        assert_eq!(config.scan.workers, 1);
        assert!(config.behavior.fail_on_vuln);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "scan:\n  timeout_secs: 30\nsummary:\n  license_limit: 3\n";
        let config: AppConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.scan.timeout_secs, 30);
        assert_eq!(config.scan.program, "scanoss-py");
        assert_eq!(config.summary.license_limit, 3);
        assert_eq!(config.summary.crypto_limit, 10);
    }
}
