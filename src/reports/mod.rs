//! Report generation for batch digests.
//!
//! This module renders an [`AggregateReport`], the batch's vulnerability
//! facts and optional lookup results in several formats:
//! - Markdown: Human-readable tables
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly output
//!
//! Empty sections are rendered with an explicit "no data" line.
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! All document-supplied data (component names, licenses, descriptions)
//! should be escaped before embedding in Markdown reports.

pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportType};

use crate::aggregate::AggregateReport;
use crate::pipeline::Diagnostic;
use crate::scan::ScanReport;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Everything a report can draw from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub aggregate: &'a AggregateReport,
    /// Lookup results, when a scan was run
    pub scan: Option<&'a ScanReport>,
    /// Documents skipped during the batch
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> ReportInput<'a> {
    #[must_use]
    pub const fn new(aggregate: &'a AggregateReport) -> Self {
        Self {
            aggregate,
            scan: None,
            diagnostics: &[],
        }
    }

    #[must_use]
    pub const fn with_scan(mut self, scan: &'a ScanReport) -> Self {
        self.scan = Some(scan);
        self
    }

    #[must_use]
    pub const fn with_diagnostics(mut self, diagnostics: &'a [Diagnostic]) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the sections selected by `config`.
    fn generate_report(
        &self,
        input: &ReportInput<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        input: &ReportInput<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_report(input, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => {
            if color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_matches_format() {
        for format in [ReportFormat::Markdown, ReportFormat::Json, ReportFormat::Summary] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_write_report_to_buffer() {
        let aggregate = AggregateReport::default();
        let input = ReportInput::new(&aggregate);
        let mut buf = Vec::new();
        create_reporter(ReportFormat::Markdown)
            .write_report(&input, &ReportConfig::all(), &mut buf)
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("No vulnerabilities were detected."));
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }
}
