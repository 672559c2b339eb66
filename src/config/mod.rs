//! Configuration module for sbom-digest.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument overrides through [`AppConfigBuilder`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sbom_digest::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Layer CLI flags over a config file
//! use sbom_digest::config::{file::load_or_default, AppConfigBuilder};
//! let (file_config, loaded_from) = load_or_default(None)?;
//! let config = AppConfigBuilder::from_config(file_config)
//!     .scan_timeout_secs(Some(30))
//!     .fail_on_vuln(true)
//!     .build();
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-digest.yaml` file in your project root or `~/.config/sbom-digest/`:
//!
//! ```yaml
//! scan:
//!   timeout_secs: 20
//!   workers: 4
//! behavior:
//!   fail_on_vuln: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_API_KEY_ENV, DEFAULT_LOOKUP_ARGS, DEFAULT_LOOKUP_PROGRAM, DEFAULT_LOOKUP_TIMEOUT_SECS,
    DEFAULT_PURLS_FILE, DEFAULT_SHORT_TABLE_LIMIT, DEFAULT_TABLE_LIMIT, FALLBACK_API_KEY_ENV,
    PURL_PLACEHOLDER,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ScanConfig, SummaryConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.sbom-digest.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
