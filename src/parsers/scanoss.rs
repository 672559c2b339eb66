//! SCANOSS scanner output normalizer.
//!
//! The document root maps each scanned file path to a list of match entries.
//! Every entry, across every file, becomes one [`ComponentRecord`].

use super::fields::{array_items, first_item, scalar_text, str_field, string_or, type_name};
use crate::model::{
    ComponentRecord, CryptoFact, Dialect, HealthMetrics, HealthValue, LicenseFact, QualityScore,
    NOT_AVAILABLE, NO_COPYRIGHT, UNKNOWN_ALGORITHM, UNKNOWN_COMPONENT, UNKNOWN_LICENSE,
};
use crate::parsers::traits::{ComponentNormalizer, ParseError};
use serde_json::Value;

/// Normalizer for SCANOSS per-file result maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanossParser;

impl ScanossParser {
    /// Create a new SCANOSS normalizer
    pub fn new() -> Self {
        Self
    }

    /// Convert one match entry into a record.
    fn convert_entry(&self, entry: &Value) -> ComponentRecord {
        let mut record = ComponentRecord {
            name: string_or(entry, "component", UNKNOWN_COMPONENT),
            version: string_or(entry, "version", NOT_AVAILABLE),
            vendor: string_or(entry, "vendor", NOT_AVAILABLE),
            package_identifier: Self::purl(entry),
            licenses: Self::licenses(entry),
            cryptography: Self::cryptography(entry),
            health: Self::health(entry),
            quality: first_item(entry, "quality")
                .map_or(QualityScore::Unknown, |q| QualityScore::from_json(q.get("score"))),
            copyright: Self::copyright(entry),
            ..ComponentRecord::default()
        };
        record.set_provenance(entry.get("provenance").and_then(Value::as_str).unwrap_or(""));
        record
    }

    /// `purl` is a list in scanner output; older outputs used a plain string.
    fn purl(entry: &Value) -> Option<String> {
        match entry.get("purl") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .find(|s| !s.trim().is_empty())
                .map(str::to_string),
            _ => None,
        }
    }

    fn licenses(entry: &Value) -> Vec<LicenseFact> {
        array_items(entry, "licenses")
            .iter()
            .map(|lic| match lic {
                Value::String(name) if !name.trim().is_empty() => LicenseFact::new(name.clone()),
                other => LicenseFact::new(string_or(other, "name", UNKNOWN_LICENSE)),
            })
            .collect()
    }

    fn cryptography(entry: &Value) -> Vec<CryptoFact> {
        array_items(entry, "cryptography")
            .iter()
            .map(|crypto| {
                CryptoFact::new(
                    string_or(crypto, "algorithm", UNKNOWN_ALGORITHM),
                    scalar_text(crypto, "strength"),
                )
            })
            .collect()
    }

    fn health(entry: &Value) -> HealthMetrics {
        let Some(health) = entry.get("health").filter(|h| h.is_object()) else {
            return HealthMetrics::default();
        };
        HealthMetrics {
            stars: HealthValue::from_json(health.get("stars")),
            forks: HealthValue::from_json(health.get("forks")),
            issues: HealthValue::from_json(health.get("issues")),
            last_updated: str_field(health, "last_update")
                .or_else(|| str_field(health, "last_updated"))
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
        }
    }

    fn copyright(entry: &Value) -> String {
        str_field(entry, "copyright")
            .or_else(|| {
                array_items(entry, "copyrights")
                    .iter()
                    .find_map(|c| str_field(c, "name"))
            })
            .unwrap_or(NO_COPYRIGHT)
            .to_string()
    }
}

impl ComponentNormalizer for ScanossParser {
    fn dialect(&self) -> Dialect {
        Dialect::ScanossNative
    }

    fn normalize(&self, root: &Value) -> Result<Vec<ComponentRecord>, ParseError> {
        let files = root.as_object().ok_or_else(|| {
            ParseError::malformed(format!(
                "SCANOSS root must be an object, found {}",
                type_name(root)
            ))
        })?;

        let mut records = Vec::new();
        for (file, entries) in files {
            let entries = entries.as_array().ok_or_else(|| {
                ParseError::malformed(format!(
                    "entries for '{file}' must be an array, found {}",
                    type_name(entries)
                ))
            })?;
            for (index, entry) in entries.iter().enumerate() {
                if !entry.is_object() {
                    return Err(ParseError::malformed(format!(
                        "entry {index} for '{file}' must be an object, found {}",
                        type_name(entry)
                    )));
                }
                records.push(self.convert_entry(entry));
            }
        }

        tracing::debug!(
            "Normalized {} SCANOSS entries from {} files",
            records.len(),
            files.len()
        );
        Ok(records)
    }
}
