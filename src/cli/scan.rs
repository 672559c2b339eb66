//! Scan command handler.
//!
//! Collects package identifiers from CycloneDX documents, persists them, and
//! looks each one up with the configured external tool.

use super::{emit_report, ensure_valid};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, run_batch};
use crate::reports::{ReportConfig, ReportInput, ReportType};
use crate::scan::{
    read_identifier_list, write_identifier_list, CommandLookup, LookupTool, ScanOrchestrator,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the scan command with the configured command-line lookup tool.
pub fn run_scan(config: &AppConfig, paths: &[PathBuf]) -> Result<i32> {
    run_scan_with(config, paths, CommandLookup::from_config(&config.scan))
}

/// Run the scan command with any lookup tool.
///
/// With no input paths, identifiers are read back from the configured list
/// file instead, so a previous run's list can be re-scanned.
pub fn run_scan_with<T: LookupTool>(config: &AppConfig, paths: &[PathBuf], tool: T) -> Result<i32> {
    ensure_valid(config)?;

    let batch = run_batch(paths);
    let identifiers = if paths.is_empty() {
        read_identifier_list(&config.scan.purls_file)
            .context("no input files given and no identifier list to re-scan")?
    } else {
        let identifiers = batch.scan_identifiers();
        write_identifier_list(&config.scan.purls_file, &identifiers)?;
        identifiers
    };

    if identifiers.is_empty() && !config.behavior.quiet {
        tracing::warn!("No package identifiers found in CycloneDX inputs");
    }

    let scan = ScanOrchestrator::from_config(tool, &config.scan).run(&identifiers);
    if scan.stats.has_problems() && !config.behavior.quiet {
        tracing::warn!(
            "{} of {} lookups did not complete ({} timed out, {} failed)",
            scan.stats.timed_out + scan.stats.failed,
            scan.stats.total,
            scan.stats.timed_out,
            scan.stats.failed
        );
    }

    let aggregate = batch.aggregate(&config.summary);
    let input = ReportInput::new(&aggregate)
        .with_scan(&scan)
        .with_diagnostics(&batch.diagnostics);
    let report_config = ReportConfig {
        report_types: vec![ReportType::Scan, ReportType::Vulnerabilities],
        title: Some("Vulnerability Scan".to_string()),
    };
    emit_report(&input, &report_config, config)?;

    if config.behavior.fail_on_vuln && aggregate.has_vulnerabilities() {
        return Ok(exit_codes::VULNS_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfigBuilder, OutputConfig};
    use crate::reports::ReportFormat;
    use crate::scan::LookupError;
    use std::time::Duration;

    struct EchoTool;

    impl LookupTool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn lookup(&self, identifier: &str, _timeout: Duration) -> Result<String, LookupError> {
            Ok(format!("checked {identifier}"))
        }
    }

    #[test]
    fn test_scan_writes_identifier_list_and_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sbom = dir.path().join("app.cdx.json");
        std::fs::write(
            &sbom,
            r#"{"bomFormat": "CycloneDX", "components": [
                {"name": "lodash", "purl": "pkg:npm/lodash@4.17.21"},
                {"name": "express", "purl": "pkg:npm/express@4.18.2"}
            ]}"#,
        )
        .expect("write sbom");

        let purls = dir.path().join("purls.txt");
        let report = dir.path().join("scan.json");
        let config = AppConfigBuilder::from_config(crate::config::AppConfig {
            output: OutputConfig {
                format: ReportFormat::Json,
                ..OutputConfig::default()
            },
            ..crate::config::AppConfig::default()
        })
        .output_file(Some(report.clone()))
        .purls_file(Some(purls.clone()))
        .quiet(true)
        .build();

        let code = run_scan_with(&config, &[sbom], EchoTool).expect("scan");
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(&purls).expect("purls"),
            "pkg:npm/lodash@4.17.21\npkg:npm/express@4.18.2\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).expect("report"))
                .expect("json");
        assert_eq!(json["scan"]["stats"]["succeeded"], 2);
        assert_eq!(json["scan"]["results"][1]["identifier"], "pkg:npm/express@4.18.2");
        assert_eq!(json["scan"]["results"][1]["outcome"]["status"], "success");
    }

    struct FailingTool;

    impl LookupTool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn lookup(&self, _identifier: &str, _timeout: Duration) -> Result<String, LookupError> {
            Err(LookupError::Failed {
                exit_code: Some(1),
                stderr: "service unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_failed_lookups_do_not_fail_the_scan() {
        let dir = tempfile::tempdir().expect("tempdir");
        let purls = dir.path().join("purls.txt");
        std::fs::write(&purls, "pkg:npm/lodash@4.17.21
").expect("write list");
        let report = dir.path().join("scan.json");
        let config = AppConfigBuilder::from_config(crate::config::AppConfig {
            output: OutputConfig {
                format: ReportFormat::Json,
                ..OutputConfig::default()
            },
            ..crate::config::AppConfig::default()
        })
        .output_file(Some(report.clone()))
        .purls_file(Some(purls))
        .build();

        let code = run_scan_with(&config, &[], FailingTool).expect("scan");
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).expect("report"))
                .expect("json");
        assert_eq!(json["scan"]["stats"]["failed"], 1);
        assert_eq!(json["scan"]["results"][0]["outcome"]["status"], "failed");
    }
}
