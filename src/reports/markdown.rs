//! Markdown report generator.

use super::escape::{
    code_fence, escape_markdown_inline, escape_markdown_list, escape_markdown_table,
};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportInput, ReportType};
use crate::aggregate::{AggregateReport, RankedEntry};
use crate::model::VulnerabilityFact;
use crate::pipeline::Diagnostic;
use crate::scan::{LookupOutcome, ScanReport};
use chrono::Utc;
use std::fmt::Write;

/// Markdown reporter
pub struct MarkdownReporter {
    /// Include the generation timestamp in the header
    timestamp: bool,
}

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { timestamp: true }
    }

    /// Omit the timestamp so output is byte-for-byte reproducible.
    #[must_use]
    pub const fn without_timestamp(mut self) -> Self {
        self.timestamp = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate_report(
        &self,
        input: &ReportInput<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let counts = &input.aggregate.counts;

        writeln!(md, "# {}\n", escape_markdown_inline(config.title()))?;
        if self.timestamp {
            writeln!(
                md,
                "**Generated:** {}\n",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        writeln!(md, "| Metric | Count |")?;
        writeln!(md, "|--------|-------|")?;
        writeln!(md, "| Documents processed | {} |", counts.documents)?;
        writeln!(md, "| Documents skipped | {} |", counts.skipped)?;
        writeln!(md, "| Components | {} |", counts.records)?;
        writeln!(md, "| Vulnerabilities | {} |", counts.vulnerabilities)?;
        md.push('\n');

        if config.includes(ReportType::Summary) {
            write_summary(&mut md, input.aggregate)?;
        }
        if config.includes(ReportType::Vulnerabilities) {
            write_vulnerabilities(&mut md, &input.aggregate.vulnerabilities)?;
        }
        if config.includes(ReportType::Scan) {
            if let Some(scan) = input.scan {
                write_scan(&mut md, scan)?;
            }
        }
        if !input.diagnostics.is_empty() {
            write_diagnostics(&mut md, input.diagnostics)?;
        }

        md.push_str("---\n\n*Generated by sbom-digest*\n");
        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

fn write_ranked(
    md: &mut String,
    heading: &str,
    column: &str,
    entries: &[RankedEntry],
    empty: &str,
) -> std::fmt::Result {
    writeln!(md, "## {heading}\n")?;
    if entries.is_empty() {
        writeln!(md, "No {empty} data available.\n")?;
        return Ok(());
    }
    writeln!(md, "| {column} | Count |")?;
    writeln!(md, "|---|---|")?;
    for entry in entries {
        writeln!(md, "| {} | {} |", escape_markdown_table(&entry.value), entry.count)?;
    }
    md.push('\n');
    Ok(())
}

fn write_summary(md: &mut String, report: &AggregateReport) -> std::fmt::Result {
    write_ranked(md, "Licenses", "License", &report.licenses, "license")?;
    write_ranked(
        md,
        "Cryptographic Algorithms",
        "Algorithm",
        &report.crypto_algorithms,
        "cryptography",
    )?;
    write_ranked(md, "Quality Scores", "Score", &report.quality_scores, "quality")?;

    writeln!(md, "## Repository Health\n")?;
    if report.health.is_empty() {
        writeln!(md, "No health data available.\n")?;
    } else {
        writeln!(md, "| Component | Stars | Forks | Issues | Last Updated |")?;
        writeln!(md, "|---|---|---|---|---|")?;
        for row in &report.health {
            writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                escape_markdown_table(&row.component),
                row.stars,
                row.forks,
                row.issues,
                escape_markdown_table(&row.last_updated)
            )?;
        }
        md.push('\n');
    }

    write_ranked(md, "Component Usage", "Component", &report.components, "component")?;
    write_ranked(md, "Provenance", "Origin", &report.provenance, "provenance")?;

    writeln!(md, "## Component Metadata\n")?;
    if report.metadata.is_empty() {
        writeln!(md, "No component metadata available.\n")?;
    } else {
        writeln!(
            md,
            "| Component | Version | Vendor | License | Quality | Provenance |"
        )?;
        writeln!(md, "|---|---|---|---|---|---|")?;
        for row in &report.metadata {
            writeln!(
                md,
                "| {} | {} | {} | {} | {} | {} |",
                escape_markdown_table(&row.component),
                escape_markdown_table(&row.version),
                escape_markdown_table(&row.vendor),
                escape_markdown_table(&row.license),
                escape_markdown_table(&row.quality),
                escape_markdown_table(&row.provenance)
            )?;
        }
        md.push('\n');
    }

    writeln!(md, "## Copyright Sample\n")?;
    if report.copyright_sample.is_empty() {
        writeln!(md, "No copyright data available.\n")?;
    } else {
        for statement in &report.copyright_sample {
            writeln!(md, "- {}", escape_markdown_list(statement))?;
        }
        md.push('\n');
    }
    Ok(())
}

fn write_vulnerabilities(md: &mut String, vulns: &[VulnerabilityFact]) -> std::fmt::Result {
    writeln!(md, "## Vulnerabilities\n")?;
    if vulns.is_empty() {
        writeln!(md, "No vulnerabilities were detected.\n")?;
        return Ok(());
    }

    writeln!(
        md,
        "| CVE | Severity | Score | Component | Version | Source | File |"
    )?;
    writeln!(md, "|---|---|---|---|---|---|---|")?;
    for v in vulns {
        writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} |",
            escape_markdown_table(&v.cve_id),
            escape_markdown_table(&v.severity),
            escape_markdown_table(&v.score),
            escape_markdown_table(&v.component),
            escape_markdown_table(&v.version),
            escape_markdown_table(&v.source_name),
            escape_markdown_table(&v.origin_file)
        )?;
    }
    md.push('\n');

    for v in vulns {
        writeln!(
            md,
            "### {} ({})\n",
            escape_markdown_inline(&v.cve_id),
            escape_markdown_inline(&v.component)
        )?;
        writeln!(md, "{}\n", escape_markdown_list(&v.description))?;
        writeln!(
            md,
            "**Recommendation:** {}\n",
            escape_markdown_list(&v.recommendation)
        )?;
        writeln!(md, "**Source:** {}\n", escape_markdown_list(&v.source_url))?;
    }
    Ok(())
}

fn write_scan(md: &mut String, scan: &ScanReport) -> std::fmt::Result {
    writeln!(md, "## Vulnerability Lookups\n")?;
    if scan.results.is_empty() {
        writeln!(md, "No package identifiers were looked up.\n")?;
        return Ok(());
    }

    let stats = &scan.stats;
    writeln!(
        md,
        "{} identifiers: {} succeeded, {} timed out, {} failed ({:.1}s).\n",
        stats.total,
        stats.succeeded,
        stats.timed_out,
        stats.failed,
        stats.duration.as_secs_f64()
    )?;
    writeln!(md, "| Identifier | Status | Attempts | Detail |")?;
    writeln!(md, "|---|---|---|---|")?;
    for result in &scan.results {
        let detail = match &result.outcome {
            LookupOutcome::Success { .. } => String::new(),
            LookupOutcome::TimedOut { after } => format!("after {}s", after.as_secs()),
            LookupOutcome::Failed { exit_code, stderr } => match exit_code {
                Some(code) => format!("exit {code}: {stderr}"),
                None => stderr.clone(),
            },
        };
        writeln!(
            md,
            "| {} | {} | {} | {} |",
            escape_markdown_table(&result.identifier),
            result.outcome.label(),
            result.attempts,
            escape_markdown_table(&detail)
        )?;
    }
    md.push('\n');

    for (identifier, output) in scan.successes() {
        let output = output.trim();
        if output.is_empty() {
            continue;
        }
        writeln!(md, "### {}\n", escape_markdown_inline(identifier))?;
        let fence = code_fence(output);
        writeln!(md, "{fence}\n{output}\n{fence}\n")?;
    }
    Ok(())
}

fn write_diagnostics(md: &mut String, diagnostics: &[Diagnostic]) -> std::fmt::Result {
    writeln!(md, "## Skipped Documents\n")?;
    for diag in diagnostics {
        writeln!(
            md,
            "- `{}`: {}",
            diag.path.display(),
            escape_markdown_list(&diag.message)
        )?;
    }
    md.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryConfig;
    use crate::model::{ComponentRecord, LicenseFact};
    use crate::scan::{LookupResult, ScanStats};
    use std::time::Duration;

    fn render(input: &ReportInput<'_>, config: &ReportConfig) -> String {
        MarkdownReporter::new()
            .without_timestamp()
            .generate_report(input, config)
            .expect("render")
    }

    #[test]
    fn test_empty_batch_renders_no_data_lines() {
        let aggregate = AggregateReport::default();
        let md = render(&ReportInput::new(&aggregate), &ReportConfig::all());
        assert!(md.contains("No license data available."));
        assert!(md.contains("No cryptography data available."));
        assert!(md.contains("No health data available."));
        assert!(md.contains("No copyright data available."));
        assert!(md.contains("No vulnerabilities were detected."));
        assert!(!md.contains("Generated:**"));
    }

    #[test]
    fn test_tables_are_escaped() {
        let records = vec![ComponentRecord {
            licenses: vec![LicenseFact::new("MIT | GPL-2.0")],
            ..ComponentRecord::named("a|b")
        }];
        let aggregate = AggregateReport::build(&records, &[], &SummaryConfig::default());
        let md = render(
            &ReportInput::new(&aggregate),
            &ReportConfig::only(ReportType::Summary),
        );
        assert!(md.contains("| MIT \\| GPL-2.0 | 1 |"));
        assert!(md.contains("| a\\|b | 1 |"));
        assert!(!md.contains("## Vulnerabilities"));
    }

    #[test]
    fn test_vulnerability_section() {
        let vulns = vec![VulnerabilityFact {
            cve_id: "CVE-2021-44228".to_string(),
            severity: "critical".to_string(),
            score: "10.0".to_string(),
            component: "log4j-core".to_string(),
            version: "2.14.1".to_string(),
            origin_file: "app.cdx.json".to_string(),
            ..VulnerabilityFact::default()
        }];
        let aggregate = AggregateReport::build(&[], &vulns, &SummaryConfig::default());
        let md = render(
            &ReportInput::new(&aggregate),
            &ReportConfig::only(ReportType::Vulnerabilities),
        );
        assert!(md.contains(
            "| CVE-2021-44228 | critical | 10.0 | log4j-core | 2.14.1 | Unknown Source | app.cdx.json |"
        ));
        assert!(md.contains("**Recommendation:** No recommendation available."));
        assert!(!md.contains("No vulnerabilities were detected."));
    }

    #[test]
    fn test_scan_section_lists_every_outcome() {
        let aggregate = AggregateReport::default();
        let scan = ScanReport {
            results: vec![
                LookupResult {
                    identifier: "pkg:npm/slow@1".to_string(),
                    outcome: LookupOutcome::TimedOut {
                        after: Duration::from_secs(10),
                    },
                    attempts: 1,
                },
                LookupResult {
                    identifier: "pkg:npm/fast@2".to_string(),
                    outcome: LookupOutcome::Success {
                        output: "{\"vulns\": []}".to_string(),
                    },
                    attempts: 1,
                },
            ],
            stats: ScanStats {
                total: 2,
                succeeded: 1,
                timed_out: 1,
                ..ScanStats::default()
            },
        };
        let md = render(
            &ReportInput::new(&aggregate).with_scan(&scan),
            &ReportConfig::only(ReportType::Scan),
        );
        assert!(md.contains("| pkg:npm/slow@1 | timed out | 1 | after 10s |"));
        assert!(md.contains("| pkg:npm/fast@2 | ok | 1 |  |"));
        assert!(md.contains("```\n{\"vulns\": []}\n```"));
    }

    #[test]
    fn test_tool_output_with_fences_stays_in_one_block() {
        let aggregate = AggregateReport::default();
        let scan = ScanReport {
            results: vec![LookupResult {
                identifier: "pkg:npm/lodash@4.17.20".to_string(),
                outcome: LookupOutcome::Success {
                    output: "Found:\n```json\n{}\n```".to_string(),
                },
                attempts: 1,
            }],
            stats: ScanStats {
                total: 1,
                succeeded: 1,
                ..ScanStats::default()
            },
        };
        let md = render(
            &ReportInput::new(&aggregate).with_scan(&scan),
            &ReportConfig::only(ReportType::Scan),
        );
        assert!(md.contains("````\nFound:\n```json\n{}\n```\n````\n"));
    }
}
