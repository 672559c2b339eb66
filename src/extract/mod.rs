//! Fact extraction from normalized records and raw documents.
//!
//! - [`facts`]: per-record license, cryptography, quality, health, copyright
//!   and provenance facts
//! - [`vulnerabilities`]: CVE facts from CycloneDX documents

pub mod facts;
pub mod vulnerabilities;

pub use facts::{
    component_label, copyright_fact, crypto_facts, health_fact, license_facts, metadata_fact,
    provenance_fact, quality_fact, ComponentMetadataRow, HealthRow,
};
pub use vulnerabilities::extract_vulnerabilities;
