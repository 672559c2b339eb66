//! Batch processing of input documents.

use super::load::{load_document, Diagnostic};
use crate::aggregate::AggregateReport;
use crate::config::SummaryConfig;
use crate::extract::extract_vulnerabilities;
use crate::model::{ComponentRecord, Dialect, RawDocument, VulnerabilityFact};
use crate::parsers::{normalize_document, ParseError};
use crate::scan::collect_package_identifiers;
use std::path::{Path, PathBuf};

/// Everything accumulated from one batch of input files.
///
/// Created fresh for every run and threaded through the pipeline explicitly.
#[derive(Debug, Default)]
pub struct BatchContext {
    /// Records from every document, in input order
    pub records: Vec<ComponentRecord>,
    pub vulnerabilities: Vec<VulnerabilityFact>,
    /// One entry per skipped document
    pub diagnostics: Vec<Diagnostic>,
    /// Documents that were loaded and normalized
    pub processed: usize,
    /// Records that came from CycloneDX documents
    cyclonedx_records: Vec<usize>,
}

impl BatchContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load, normalize and extract one file. A failing file adds a diagnostic
    /// and leaves everything else untouched.
    pub fn ingest(&mut self, path: &Path) {
        match load_document(path).and_then(|doc| self.absorb(&doc)) {
            Ok(added) => {
                self.processed += 1;
                tracing::info!("{}: {added} components", path.display());
            }
            Err(err) => {
                let diagnostic = Diagnostic::new(path, &err);
                tracing::warn!("Skipping {diagnostic}");
                self.diagnostics.push(diagnostic);
            }
        }
    }

    /// Add an already-loaded document. Returns the number of records added.
    pub fn absorb(&mut self, doc: &RawDocument) -> Result<usize, ParseError> {
        let records = normalize_document(doc)?;
        let added = records.len();
        if doc.dialect() == Dialect::CycloneDx {
            let start = self.records.len();
            self.cyclonedx_records.extend(start..start + added);
        }
        self.records.extend(records);
        self.vulnerabilities.extend(extract_vulnerabilities(doc));
        Ok(added)
    }

    /// Package identifiers from CycloneDX records, in first-seen order.
    #[must_use]
    pub fn scan_identifiers(&self) -> Vec<String> {
        collect_package_identifiers(
            self.cyclonedx_records
                .iter()
                .filter_map(|&i| self.records.get(i)),
        )
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.diagnostics.len()
    }

    /// Build the aggregate tables for this batch.
    #[must_use]
    pub fn aggregate(&self, config: &SummaryConfig) -> AggregateReport {
        AggregateReport::build(&self.records, &self.vulnerabilities, config)
            .with_document_counts(self.processed, self.skipped())
    }
}

/// Process every path in order. Never fails: unusable files become diagnostics.
pub fn run_batch<P: AsRef<Path>>(paths: &[P]) -> BatchContext {
    let mut ctx = BatchContext::new();
    for path in paths {
        ctx.ingest(path.as_ref());
    }
    tracing::info!(
        "Processed {} of {} documents ({} records, {} vulnerabilities)",
        ctx.processed,
        paths.len(),
        ctx.records.len(),
        ctx.vulnerabilities.len()
    );
    ctx
}

/// Keep only paths with an SBOM-like extension (`.json`, `.spdx`).
pub fn sbom_paths<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json") || e.eq_ignore_ascii_case("spdx"))
        })
        .collect()
}
