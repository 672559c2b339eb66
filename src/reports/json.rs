//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportInput, ReportType};
use crate::aggregate::{AggregateCounts, RankedEntry};
use crate::extract::{ComponentMetadataRow, HealthRow};
use crate::model::VulnerabilityFact;
use crate::pipeline::Diagnostic;
use crate::scan::ScanReport;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_report(
        &self,
        input: &ReportInput<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let aggregate = input.aggregate;
        let report = JsonDigestReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "sbom-digest".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                title: config.title(),
                generated_at: Utc::now().to_rfc3339(),
            },
            counts: aggregate.counts,
            summary: config.includes(ReportType::Summary).then(|| SummarySection {
                licenses: &aggregate.licenses,
                crypto_algorithms: &aggregate.crypto_algorithms,
                quality_scores: &aggregate.quality_scores,
                health: &aggregate.health,
                components: &aggregate.components,
                provenance: &aggregate.provenance,
                metadata: &aggregate.metadata,
                copyright_sample: &aggregate.copyright_sample,
            }),
            vulnerabilities: config
                .includes(ReportType::Vulnerabilities)
                .then_some(aggregate.vulnerabilities.as_slice()),
            scan: input.scan.filter(|_| config.includes(ReportType::Scan)),
            skipped: input.diagnostics,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDigestReport<'a> {
    metadata: JsonReportMetadata<'a>,
    counts: AggregateCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummarySection<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vulnerabilities: Option<&'a [VulnerabilityFact]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scan: Option<&'a ScanReport>,
    skipped: &'a [Diagnostic],
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    title: &'a str,
    generated_at: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct SummarySection<'a> {
    licenses: &'a [RankedEntry],
    crypto_algorithms: &'a [RankedEntry],
    quality_scores: &'a [RankedEntry],
    health: &'a [HealthRow],
    components: &'a [RankedEntry],
    provenance: &'a [RankedEntry],
    metadata: &'a [ComponentMetadataRow],
    copyright_sample: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateReport;
    use crate::config::SummaryConfig;
    use crate::model::{ComponentRecord, HealthMetrics, HealthValue};
    use crate::parsers::ParseError;
    use serde_json::Value;

    fn render(input: &ReportInput<'_>, config: &ReportConfig) -> Value {
        let text = JsonReporter::new()
            .generate_report(input, config)
            .expect("render");
        serde_json::from_str(&text).expect("valid JSON")
    }

    #[test]
    fn test_json_report_structure() {
        let records = vec![ComponentRecord {
            health: HealthMetrics {
                stars: HealthValue::Count(42),
                ..HealthMetrics::default()
            },
            ..ComponentRecord::named("curl")
        }];
        let aggregate = AggregateReport::build(&records, &[], &SummaryConfig::default())
            .with_document_counts(1, 0);
        let json = render(&ReportInput::new(&aggregate), &ReportConfig::all());

        assert_eq!(json["metadata"]["tool"]["name"], "sbom-digest");
        assert!(json["metadata"]["generated_at"].is_string());
        assert_eq!(json["counts"]["documents"], 1);
        assert_eq!(json["summary"]["licenses"][0]["value"], "Unknown License");
        assert_eq!(json["summary"]["health"][0]["stars"], 42);
        assert_eq!(json["summary"]["health"][0]["forks"], "N/A");
        assert_eq!(json["vulnerabilities"], Value::Array(vec![]));
        assert!(json.get("scan").is_none());
    }

    #[test]
    fn test_sections_follow_config() {
        let aggregate = AggregateReport::default();
        let diagnostics = vec![Diagnostic::new(
            "broken.json",
            &ParseError::JsonError("EOF while parsing".to_string()),
        )];
        let input = ReportInput::new(&aggregate).with_diagnostics(&diagnostics);
        let json = render(&input, &ReportConfig::only(ReportType::Vulnerabilities));

        assert!(json.get("summary").is_none());
        assert!(json["vulnerabilities"].is_array());
        assert_eq!(json["skipped"][0]["kind"], "malformed_json");
    }
}
