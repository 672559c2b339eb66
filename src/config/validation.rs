//! Configuration validation for sbom-digest.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::PURL_PLACEHOLDER;
use super::types::{AppConfig, BehaviorConfig, OutputConfig, ScanConfig, SummaryConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.summary.validate());
        errors.extend(self.scan.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for SummaryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        [
            ("summary.license_limit", self.license_limit),
            ("summary.crypto_limit", self.crypto_limit),
            ("summary.quality_limit", self.quality_limit),
            ("summary.health_limit", self.health_limit),
            ("summary.metadata_limit", self.metadata_limit),
            ("summary.component_limit", self.component_limit),
            ("summary.provenance_limit", self.provenance_limit),
            ("summary.copyright_sample", self.copyright_sample),
        ]
        .into_iter()
        .filter(|(_, limit)| *limit == 0)
        .map(|(field, _)| ConfigError::new(field, "Table size must be at least 1"))
        .collect()
    }
}

impl Validatable for ScanConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.program.trim().is_empty() {
            errors.push(ConfigError::new(
                "scan.program",
                "Lookup program must not be empty",
            ));
        }

        if !self.args.iter().any(|arg| arg.contains(PURL_PLACEHOLDER)) {
            errors.push(ConfigError::new(
                "scan.args",
                "Arguments must contain a '{purl}' placeholder",
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "scan.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        if self.workers == 0 {
            errors.push(ConfigError::new(
                "scan.workers",
                "Worker count must be at least 1",
            ));
        }

        if self.api_key_env.trim().is_empty() {
            errors.push(ConfigError::new(
                "scan.api_key_env",
                "Credential variable name must not be empty",
            ));
        }

        if self.purls_file.as_os_str().is_empty() {
            errors.push(ConfigError::new(
                "scan.purls_file",
                "Identifier list path must not be empty",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}
