//! **Normalize SBOM documents and summarize the facts they carry.**
//!
//! `sbom-digest` reads SBOMs in three dialects (SCANOSS per-file scan results,
//! CycloneDX JSON and SPDX JSON), normalizes every entry into a canonical
//! [`ComponentRecord`], and aggregates license, cryptography, quality, health,
//! copyright and provenance facts into ranked, deduplicated tables. It also
//! extracts CycloneDX vulnerability data and can drive an external
//! vulnerability lookup tool over every package URL, with a timeout per lookup.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the canonical [`ComponentRecord`] and [`VulnerabilityFact`].
//! - **[`parsers`]**: dialect detection and one normalizer per dialect.
//! - **[`extract`]**: pure fact extraction over records and documents.
//! - **[`aggregate`]**: top-N ranking and deduplication into an [`AggregateReport`].
//! - **[`scan`]**: bounded, per-identifier lookups against an external tool.
//! - **[`pipeline`]**: batch loading with per-file skip diagnostics.
//! - **[`reports`]**: Markdown, JSON and terminal summary output.
//!
//! ## Getting Started
//!
//! ```no_run
//! use sbom_digest::config::SummaryConfig;
//! use sbom_digest::pipeline::run_batch;
//!
//! let batch = run_batch(&["results.json", "app.cdx.json"]);
//! for diag in &batch.diagnostics {
//!     eprintln!("skipped {diag}");
//! }
//!
//! let report = batch.aggregate(&SummaryConfig::default());
//! for entry in &report.licenses {
//!     println!("{}: {}", entry.value, entry.count);
//! }
//! ```
//!
//! ### Looking up package URLs
//!
//! ```no_run
//! use sbom_digest::config::ScanConfig;
//! use sbom_digest::pipeline::run_batch;
//! use sbom_digest::scan::{CommandLookup, ScanOrchestrator};
//!
//! let config = ScanConfig::default();
//! let identifiers = run_batch(&["app.cdx.json"]).scan_identifiers();
//! let orchestrator =
//!     ScanOrchestrator::from_config(CommandLookup::from_config(&config), &config);
//! let report = orchestrator.run(&identifiers);
//! println!("{} succeeded, {} timed out", report.stats.succeeded, report.stats.timed_out);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod scan;

// Re-export main types for convenience
pub use aggregate::{AggregateReport, RankedEntry};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use config::{BehaviorConfig, OutputConfig, ScanConfig, SummaryConfig};
pub use error::{DigestError, ErrorContext, Result};
pub use model::{ComponentRecord, Dialect, RawDocument, VulnerabilityFact};
pub use parsers::{detect_dialect, normalize_document, ComponentNormalizer, ParseError};
pub use pipeline::{load_document, run_batch, BatchContext, Diagnostic, SkipKind};
pub use reports::{ReportFormat, ReportGenerator};
pub use scan::{CommandLookup, LookupOutcome, LookupTool, ScanOrchestrator, ScanReport};
