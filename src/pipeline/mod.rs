//! Batch pipeline shared by the CLI commands.
//!
//! Files are loaded and classified one at a time ([`load_document`]); a
//! [`BatchContext`] accumulates records, vulnerability facts and skip
//! diagnostics, and is then aggregated into an
//! [`AggregateReport`](crate::aggregate::AggregateReport).

mod batch;
mod load;
mod output;

pub use batch::{run_batch, sbom_paths, BatchContext};
pub use load::{load_document, Diagnostic, SkipKind};
pub use output::{write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Vulnerabilities were found and `--fail-on-vuln` was set
    pub const VULNS_FOUND: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::VULNS_FOUND, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
