//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod scan;
mod summary;
mod vulns;

pub use scan::{run_scan, run_scan_with};
pub use summary::run_summary;
pub use vulns::run_vulns;

use crate::config::AppConfig;
use crate::pipeline::{write_output, OutputTarget};
use crate::reports::{create_reporter_with_options, should_use_color, ReportConfig, ReportInput};
use anyhow::{Context, Result};

/// Render a report in the configured format and write it to the configured target.
pub(crate) fn emit_report(
    input: &ReportInput<'_>,
    report_config: &ReportConfig,
    config: &AppConfig,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(config.output.format, color);
    let content = reporter
        .generate_report(input, report_config)
        .with_context(|| format!("Failed to render {} report", config.output.format))?;
    write_output(&content, &target, config.behavior.quiet)
}

/// Reject an invalid configuration before any work starts.
pub(crate) fn ensure_valid(config: &AppConfig) -> Result<()> {
    use crate::config::Validatable;
    use crate::error::DigestError;

    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(DigestError::validation(details.join("; ")).into())
}
