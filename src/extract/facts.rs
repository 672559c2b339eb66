//! Per-record fact extractors.
//!
//! Each extractor is total: a record with no data for a category yields the
//! category default (or nothing, where absence is meaningful), never an error.

use crate::model::{ComponentRecord, CryptoFact, HealthValue, LicenseFact, QualityScore};
use serde::{Deserialize, Serialize};

/// Licenses of a record. A record with no license data counts as one unknown license.
#[must_use]
pub fn license_facts(record: &ComponentRecord) -> Vec<LicenseFact> {
    if record.licenses.is_empty() {
        vec![LicenseFact::unknown()]
    } else {
        record.licenses.clone()
    }
}

/// Cryptographic algorithms of a record.
///
/// No cryptography data yields no facts; it is not an unknown algorithm.
#[must_use]
pub fn crypto_facts(record: &ComponentRecord) -> Vec<CryptoFact> {
    record.cryptography.clone()
}

/// Quality score of a record. Only the first score in the source was kept.
#[must_use]
pub const fn quality_fact(record: &ComponentRecord) -> QualityScore {
    record.quality
}

/// Health row for a record.
#[must_use]
pub fn health_fact(record: &ComponentRecord) -> HealthRow {
    HealthRow {
        component: record.name.clone(),
        stars: record.health.stars,
        forks: record.health.forks,
        issues: record.health.issues,
        last_updated: record.health.last_updated.clone(),
    }
}

#[must_use]
pub fn copyright_fact(record: &ComponentRecord) -> &str {
    &record.copyright
}

#[must_use]
pub fn provenance_fact(record: &ComponentRecord) -> &str {
    &record.provenance
}

/// Label used by the component usage summary.
#[must_use]
pub fn component_label(record: &ComponentRecord) -> &str {
    &record.name
}

/// Metadata row for the component table.
#[must_use]
pub fn metadata_fact(record: &ComponentRecord) -> ComponentMetadataRow {
    let license = license_facts(record)
        .into_iter()
        .next()
        .unwrap_or_else(LicenseFact::unknown);
    ComponentMetadataRow {
        component: record.name.clone(),
        version: record.version.clone(),
        vendor: record.vendor.clone(),
        license: license.name,
        quality: record.quality.label(),
        provenance: record.provenance.clone(),
    }
}

/// One row of the repository health table.
///
/// Rows are compared field by field; two components with the same name and
/// metrics collapse into one row when deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthRow {
    pub component: String,
    pub stars: HealthValue,
    pub forks: HealthValue,
    pub issues: HealthValue,
    pub last_updated: String,
}

/// One row of the component metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentMetadataRow {
    pub component: String,
    pub version: String,
    pub vendor: String,
    /// First license of the component
    pub license: String,
    pub quality: String,
    pub provenance: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HealthMetrics;

    #[test]
    fn test_license_facts_default_to_unknown() {
        let record = ComponentRecord::named("zlib");
        assert_eq!(license_facts(&record), vec![LicenseFact::unknown()]);

        let record = ComponentRecord {
            licenses: vec![LicenseFact::new("MIT"), LicenseFact::new("MIT")],
            ..ComponentRecord::default()
        };
        assert_eq!(license_facts(&record).len(), 2);
    }

    #[test]
    fn test_crypto_facts_empty_when_absent() {
        assert!(crypto_facts(&ComponentRecord::default()).is_empty());
    }

    #[test]
    fn test_health_fact() {
        let record = ComponentRecord {
            name: "curl".to_string(),
            health: HealthMetrics {
                stars: HealthValue::Count(10),
                ..HealthMetrics::default()
            },
            ..ComponentRecord::default()
        };
        let row = health_fact(&record);
        assert_eq!(row.component, "curl");
        assert_eq!(row.stars, HealthValue::Count(10));
        assert_eq!(row.forks, HealthValue::NotAvailable);
        assert_eq!(row.last_updated, "N/A");
    }

    #[test]
    fn test_metadata_fact_uses_first_license_and_quality_label() {
        let record = ComponentRecord {
            name: "openssl".to_string(),
            licenses: vec![LicenseFact::new("Apache-2.0"), LicenseFact::new("OpenSSL")],
            quality: QualityScore::Numeric(4.0),
            ..ComponentRecord::default()
        };
        let row = metadata_fact(&record);
        assert_eq!(row.license, "Apache-2.0");
        assert_eq!(row.quality, "4");
        assert_eq!(row.provenance, "Unknown");

        let row = metadata_fact(&ComponentRecord::default());
        assert_eq!(row.license, "Unknown License");
        assert_eq!(row.quality, "N/A");
    }

    #[test]
    fn test_scalar_facts() {
        let record = ComponentRecord::default();
        assert_eq!(copyright_fact(&record), "No copyright info");
        assert_eq!(provenance_fact(&record), "Unknown");
        assert_eq!(component_label(&record), "Unknown Component");
        assert_eq!(quality_fact(&record), QualityScore::Unknown);
    }
}
