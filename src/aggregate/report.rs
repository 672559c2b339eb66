//! The aggregate report handed to report generators.

use super::dedup::{dedup_rows, distinct_sample};
use super::frequency::{top_n, RankedEntry};
use crate::config::SummaryConfig;
use crate::extract::{
    component_label, copyright_fact, crypto_facts, health_fact, license_facts, metadata_fact,
    provenance_fact, quality_fact, ComponentMetadataRow, HealthRow,
};
use crate::model::{ComponentRecord, VulnerabilityFact, NO_COPYRIGHT};
use serde::{Deserialize, Serialize};

/// Counters describing the batch an aggregate was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    /// Documents that were loaded and normalized
    pub documents: usize,
    /// Documents skipped with a diagnostic
    pub skipped: usize,
    /// Component records across all documents
    pub records: usize,
    /// Vulnerability facts across all documents
    pub vulnerabilities: usize,
}

/// Ranked and deduplicated views over one batch of records.
///
/// Always rebuilt from scratch; nothing is carried over between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub licenses: Vec<RankedEntry>,
    pub crypto_algorithms: Vec<RankedEntry>,
    pub quality_scores: Vec<RankedEntry>,
    pub components: Vec<RankedEntry>,
    pub provenance: Vec<RankedEntry>,
    pub health: Vec<HealthRow>,
    pub metadata: Vec<ComponentMetadataRow>,
    /// First distinct copyright statements, placeholders excluded
    pub copyright_sample: Vec<String>,
    pub vulnerabilities: Vec<VulnerabilityFact>,
}

impl AggregateReport {
    /// Build every table from the given records and vulnerability facts.
    #[must_use]
    pub fn build(
        records: &[ComponentRecord],
        vulnerabilities: &[VulnerabilityFact],
        config: &SummaryConfig,
    ) -> Self {
        let licenses = top_n(
            records
                .iter()
                .flat_map(license_facts)
                .map(|fact| fact.name),
            config.license_limit,
        );
        let crypto_algorithms = top_n(
            records
                .iter()
                .flat_map(crypto_facts)
                .map(|fact| fact.algorithm),
            config.crypto_limit,
        );
        let quality_scores = top_n(
            records.iter().map(|r| quality_fact(r).label()),
            config.quality_limit,
        );
        let components = top_n(records.iter().map(component_label), config.component_limit);
        let provenance = top_n(records.iter().map(provenance_fact), config.provenance_limit);

        let health = dedup_rows(records.iter().map(health_fact), config.health_limit);
        let metadata = dedup_rows(records.iter().map(metadata_fact), config.metadata_limit);
        let copyright_sample = distinct_sample(
            records
                .iter()
                .map(copyright_fact)
                .filter(|c| *c != NO_COPYRIGHT),
            config.copyright_sample,
        );

        Self {
            counts: AggregateCounts {
                records: records.len(),
                vulnerabilities: vulnerabilities.len(),
                ..AggregateCounts::default()
            },
            licenses,
            crypto_algorithms,
            quality_scores,
            components,
            provenance,
            health,
            metadata,
            copyright_sample,
            vulnerabilities: vulnerabilities.to_vec(),
        }
    }

    /// Record how many documents were processed and skipped.
    #[must_use]
    pub const fn with_document_counts(mut self, documents: usize, skipped: usize) -> Self {
        self.counts.documents = documents;
        self.counts.skipped = skipped;
        self
    }

    /// Whether any vulnerability fact was found.
    #[must_use]
    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }

    /// Whether the batch produced no component records at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.counts.records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CryptoFact, HealthMetrics, HealthValue, LicenseFact, QualityScore};

    fn record(name: &str, licenses: &[&str]) -> ComponentRecord {
        ComponentRecord {
            name: name.to_string(),
            licenses: licenses.iter().map(|l| LicenseFact::new(*l)).collect(),
            ..ComponentRecord::default()
        }
    }

    #[test]
    fn test_license_occurrences_are_counted() {
        let records = vec![record("a", &[]), record("b", &["MIT", "MIT"])];
        let report = AggregateReport::build(&records, &[], &SummaryConfig::default());
        let licenses: Vec<_> = report
            .licenses
            .iter()
            .map(|e| (e.value.as_str(), e.count))
            .collect();
        assert_eq!(licenses, [("MIT", 2), ("Unknown License", 1)]);
    }

    #[test]
    fn test_empty_batch() {
        let report = AggregateReport::build(&[], &[], &SummaryConfig::default());
        assert!(report.is_empty());
        assert!(report.licenses.is_empty());
        assert!(report.health.is_empty());
        assert!(!report.has_vulnerabilities());
    }

    #[test]
    fn test_crypto_absence_is_not_counted() {
        let mut with_crypto = record("openssl", &["Apache-2.0"]);
        with_crypto.cryptography = vec![
            CryptoFact::new("aes", None),
            CryptoFact::new("sha256", None),
            CryptoFact::new("aes", Some("256".to_string())),
        ];
        let records = vec![with_crypto, record("zlib", &["Zlib"])];
        let report = AggregateReport::build(&records, &[], &SummaryConfig::default());
        let algorithms: Vec<_> = report
            .crypto_algorithms
            .iter()
            .map(|e| (e.value.as_str(), e.count))
            .collect();
        assert_eq!(algorithms, [("aes", 2), ("sha256", 1)]);
    }

    #[test]
    fn test_health_rows_deduplicated() {
        let health = HealthMetrics {
            stars: HealthValue::Count(5),
            ..HealthMetrics::default()
        };
        let mut a = record("curl", &[]);
        a.health = health.clone();
        let mut b = record("curl", &[]);
        b.health = health;
        let c = record("zlib", &[]);
        let report = AggregateReport::build(&[a, b, c], &[], &SummaryConfig::default());
        assert_eq!(report.health.len(), 2);
        assert_eq!(report.health[0].component, "curl");
        assert_eq!(report.counts.records, 3);
    }

    #[test]
    fn test_health_rows_keep_components_with_same_metrics() {
        let health = HealthMetrics {
            stars: HealthValue::Count(5),
            ..HealthMetrics::default()
        };
        let mut a = record("curl", &[]);
        a.health = health.clone();
        let mut b = record("zlib", &[]);
        b.health = health;
        let report = AggregateReport::build(&[a, b], &[], &SummaryConfig::default());
        let names: Vec<&str> = report.health.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(names, ["curl", "zlib"]);
    }

    #[test]
    fn test_short_tables_and_copyright_sample() {
        let records: Vec<_> = (0..8)
            .map(|i| ComponentRecord {
                name: format!("comp-{}", i % 6),
                copyright: if i % 2 == 0 {
                    format!("(c) {i}")
                } else {
                    NO_COPYRIGHT.to_string()
                },
                quality: QualityScore::Numeric(f64::from(i % 3)),
                ..ComponentRecord::default()
            })
            .collect();
        let report = AggregateReport::build(&records, &[], &SummaryConfig::default());
        assert_eq!(report.components.len(), 5);
        assert_eq!(report.components[0].value, "comp-0");
        assert_eq!(report.components[0].count, 2);
        assert_eq!(report.copyright_sample, ["(c) 0", "(c) 2", "(c) 4", "(c) 6"]);
        assert_eq!(report.quality_scores[0].value, "0");
        assert_eq!(report.provenance[0].value, "Unknown");
        assert_eq!(report.provenance[0].count, 8);
    }

    #[test]
    fn test_document_counts() {
        let report =
            AggregateReport::build(&[], &[], &SummaryConfig::default()).with_document_counts(3, 1);
        assert_eq!(report.counts.documents, 3);
        assert_eq!(report.counts.skipped, 1);
    }
}
