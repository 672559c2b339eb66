//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable Markdown
    #[default]
    Markdown,
    /// Structured JSON output
    Json,
    /// Brief summary output for the terminal
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Sections a report can contain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// All sections
    #[default]
    All,
    /// Ranked and deduplicated fact tables
    Summary,
    /// Vulnerabilities embedded in CycloneDX documents
    Vulnerabilities,
    /// External lookup results
    Scan,
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Which report sections to include
    pub report_types: Vec<ReportType>,
    /// Title for the report
    pub title: Option<String>,
}

impl ReportConfig {
    /// Config with every section included.
    #[must_use]
    pub fn all() -> Self {
        Self {
            report_types: vec![ReportType::All],
            title: None,
        }
    }

    /// Config with a single section.
    #[must_use]
    pub fn only(report_type: ReportType) -> Self {
        Self {
            report_types: vec![report_type],
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether a section should be rendered. An empty list means all.
    #[must_use]
    pub fn includes(&self, report_type: ReportType) -> bool {
        self.report_types.is_empty()
            || self
                .report_types
                .iter()
                .any(|t| *t == ReportType::All || *t == report_type)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("SBOM Digest")
    }
}
