//! Vulnerability report command handler.

use super::{emit_report, ensure_valid};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, run_batch};
use crate::reports::{ReportConfig, ReportInput, ReportType};
use anyhow::Result;
use std::path::PathBuf;

/// Run the vulns command: list every vulnerability embedded in the given
/// CycloneDX documents.
pub fn run_vulns(config: &AppConfig, paths: &[PathBuf]) -> Result<i32> {
    ensure_valid(config)?;

    let batch = run_batch(paths);
    let aggregate = batch.aggregate(&config.summary);
    if !config.behavior.quiet {
        tracing::info!(
            "{} vulnerabilities across {} documents",
            aggregate.vulnerabilities.len(),
            batch.processed
        );
    }

    let input = ReportInput::new(&aggregate).with_diagnostics(&batch.diagnostics);
    let report_config =
        ReportConfig::only(ReportType::Vulnerabilities).with_title("Vulnerability Report");
    emit_report(&input, &report_config, config)?;

    if config.behavior.fail_on_vuln && aggregate.has_vulnerabilities() {
        return Ok(exit_codes::VULNS_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}
