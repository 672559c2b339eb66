//! Vulnerability fact extraction for CycloneDX documents.
//!
//! Two shapes are read: vulnerabilities embedded in each component, and the
//! BOM-level `vulnerabilities` array whose `affects` entries point at
//! components by `bom-ref`. Facts are emitted in document order and are never
//! deduplicated here.

use crate::model::{
    Dialect, RawDocument, VulnerabilityFact, NOT_AVAILABLE, NO_DESCRIPTION, NO_RECOMMENDATION,
    NO_SOURCE_URL, UNKNOWN_COMPONENT, UNKNOWN_CVE, UNKNOWN_SEVERITY, UNKNOWN_SOURCE,
};
use crate::parsers::{array_items, first_item, scalar_text, str_field, string_or};
use serde_json::Value;
use std::collections::HashMap;

/// Component coordinates a vulnerability is attributed to.
#[derive(Debug, Clone, Copy)]
struct Affected<'a> {
    name: &'a str,
    version: &'a str,
}

impl Default for Affected<'_> {
    fn default() -> Self {
        Self {
            name: UNKNOWN_COMPONENT,
            version: NOT_AVAILABLE,
        }
    }
}

impl<'a> Affected<'a> {
    fn of(comp: &'a Value) -> Self {
        Self {
            name: str_field(comp, "name").unwrap_or(UNKNOWN_COMPONENT),
            version: str_field(comp, "version").unwrap_or(NOT_AVAILABLE),
        }
    }
}

/// Extract every vulnerability fact from a document.
///
/// Documents of other dialects carry no vulnerability data and yield nothing.
#[must_use]
pub fn extract_vulnerabilities(doc: &RawDocument) -> Vec<VulnerabilityFact> {
    if doc.dialect() != Dialect::CycloneDx {
        return Vec::new();
    }

    let origin = doc.origin();
    let root = doc.root();
    let components = array_items(root, "components");
    let mut facts = Vec::new();

    for comp in components {
        let affected = Affected::of(comp);
        for vuln in array_items(comp, "vulnerabilities") {
            facts.push(build_fact(vuln, affected, &origin));
        }
    }

    let top_level = array_items(root, "vulnerabilities");
    if !top_level.is_empty() {
        let by_ref: HashMap<&str, Affected<'_>> = components
            .iter()
            .filter_map(|comp| str_field(comp, "bom-ref").map(|r| (r, Affected::of(comp))))
            .collect();

        for vuln in top_level {
            let refs = array_items(vuln, "affects");
            if refs.is_empty() {
                facts.push(build_fact(vuln, Affected::default(), &origin));
                continue;
            }
            for affect in refs {
                let affected = str_field(affect, "ref")
                    .and_then(|r| by_ref.get(r).copied())
                    .unwrap_or_default();
                facts.push(build_fact(vuln, affected, &origin));
            }
        }
    }

    if !facts.is_empty() {
        tracing::debug!("{}: {} vulnerability facts", origin, facts.len());
    }
    facts
}

/// Build one fact from a CycloneDX vulnerability object.
fn build_fact(vuln: &Value, affected: Affected<'_>, origin: &str) -> VulnerabilityFact {
    let rating = first_item(vuln, "ratings");
    let source = vuln.get("source");

    VulnerabilityFact {
        cve_id: string_or(vuln, "id", UNKNOWN_CVE),
        severity: rating
            .and_then(|r| str_field(r, "severity"))
            .unwrap_or(UNKNOWN_SEVERITY)
            .to_string(),
        score: rating
            .and_then(|r| scalar_text(r, "score"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: string_or(vuln, "description", NO_DESCRIPTION),
        recommendation: string_or(vuln, "recommendation", NO_RECOMMENDATION),
        source_name: source
            .and_then(|s| str_field(s, "name"))
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string(),
        source_url: source
            .and_then(|s| str_field(s, "url"))
            .unwrap_or(NO_SOURCE_URL)
            .to_string(),
        component: affected.name.to_string(),
        version: affected.version.to_string(),
        origin_file: origin.to_string(),
    }
}
