//! Summary command handler.
//!
//! Implements the `summary` subcommand: normalize a batch of documents and
//! render the aggregate fact tables.

use super::{emit_report, ensure_valid};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, run_batch};
use crate::reports::{ReportConfig, ReportInput, ReportType};
use anyhow::Result;
use std::path::PathBuf;

/// Run the summary command, returning the desired exit code.
pub fn run_summary(config: &AppConfig, paths: &[PathBuf]) -> Result<i32> {
    ensure_valid(config)?;

    let batch = run_batch(paths);
    let aggregate = batch.aggregate(&config.summary);
    if aggregate.is_empty() && !config.behavior.quiet {
        tracing::warn!("No component records found in {} input files", paths.len());
    }

    let input = ReportInput::new(&aggregate).with_diagnostics(&batch.diagnostics);
    let report_config = ReportConfig {
        report_types: vec![ReportType::Summary, ReportType::Vulnerabilities],
        title: Some("SBOM Summary".to_string()),
    };
    emit_report(&input, &report_config, config)?;

    if config.behavior.fail_on_vuln && aggregate.has_vulnerabilities() {
        return Ok(exit_codes::VULNS_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}
