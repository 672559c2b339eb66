//! Canonical per-component record and the facts it carries.
//!
//! Every field has a documented default so that a record built from a
//! completely empty entry is still fully populated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default component name.
pub const UNKNOWN_COMPONENT: &str = "Unknown Component";
/// Default for version, vendor and unavailable metrics.
pub const NOT_AVAILABLE: &str = "N/A";
/// Default license name.
pub const UNKNOWN_LICENSE: &str = "Unknown License";
/// Default crypto algorithm name.
pub const UNKNOWN_ALGORITHM: &str = "Unknown Algorithm";
/// Default copyright text.
pub const NO_COPYRIGHT: &str = "No copyright info";
/// Default provenance.
pub const UNKNOWN_PROVENANCE: &str = "Unknown";

/// Canonical view of one component entry from one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub version: String,
    pub vendor: String,
    /// Package URL, only when the source dialect supplies one
    pub package_identifier: Option<String>,
    pub licenses: Vec<LicenseFact>,
    pub cryptography: Vec<CryptoFact>,
    pub health: HealthMetrics,
    pub quality: QualityScore,
    pub copyright: String,
    pub provenance: String,
}

impl Default for ComponentRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_COMPONENT.to_string(),
            version: NOT_AVAILABLE.to_string(),
            vendor: NOT_AVAILABLE.to_string(),
            package_identifier: None,
            licenses: Vec::new(),
            cryptography: Vec::new(),
            health: HealthMetrics::default(),
            quality: QualityScore::Unknown,
            copyright: NO_COPYRIGHT.to_string(),
            provenance: UNKNOWN_PROVENANCE.to_string(),
        }
    }
}

impl ComponentRecord {
    /// Create a record with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the provenance, trimming whitespace and mapping blank text to the default.
    pub fn set_provenance(&mut self, provenance: &str) {
        self.provenance = normalize_provenance(provenance);
    }
}

/// Trim a provenance value; blank values become [`UNKNOWN_PROVENANCE`].
#[must_use]
pub fn normalize_provenance(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_PROVENANCE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A single license attached to a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseFact {
    pub name: String,
}

impl LicenseFact {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The fact used when a component has no license information.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LICENSE)
    }
}

/// A cryptographic algorithm detected in a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CryptoFact {
    pub algorithm: String,
    pub strength: Option<String>,
}

impl CryptoFact {
    #[must_use]
    pub fn new(algorithm: impl Into<String>, strength: Option<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            strength,
        }
    }
}

/// A repository health counter that may be missing.
///
/// Missing counters render as `"N/A"`; they are never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HealthValue {
    Count(i64),
    #[default]
    NotAvailable,
}

impl HealthValue {
    /// Interpret a JSON value as a counter.
    ///
    /// Integers and numeric strings are accepted; anything else is unavailable.
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map_or(Self::NotAvailable, Self::Count),
            Some(serde_json::Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_or(Self::NotAvailable, Self::Count),
            _ => Self::NotAvailable,
        }
    }
}

impl fmt::Display for HealthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

// Serialized as a plain number, or the literal "N/A" string.
impl Serialize for HealthValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Count(n) => serializer.serialize_i64(*n),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for HealthValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(Some(&value)))
    }
}

/// Repository health metrics for a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub stars: HealthValue,
    pub forks: HealthValue,
    pub issues: HealthValue,
    pub last_updated: String,
}

impl Default for HealthMetrics {
    fn default() -> Self {
        Self {
            stars: HealthValue::NotAvailable,
            forks: HealthValue::NotAvailable,
            issues: HealthValue::NotAvailable,
            last_updated: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Quality score of a component.
///
/// Sources deliver scores as numbers, numeric strings or `"n/m"` fractions;
/// all of them collapse into [`QualityScore::Numeric`]. Anything else is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QualityScore {
    Numeric(f64),
    #[default]
    Unknown,
}

impl QualityScore {
    /// Interpret a JSON score value.
    #[must_use]
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => n.as_f64().map_or(Self::Unknown, Self::Numeric),
            Some(serde_json::Value::String(s)) => Self::parse(s),
            _ => Self::Unknown,
        }
    }

    /// Parse a textual score such as `"4"`, `"4.5"` or `"4/5"`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let numerator = text.split_once('/').map_or(text, |(n, _)| n.trim());
        numerator
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(Self::Unknown, Self::Numeric)
    }

    /// Label used in tables; integral scores drop the fractional part.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Numeric(v) if v.fract() == 0.0 => format!("{}", *v as i64),
            Self::Numeric(v) => format!("{v}"),
            Self::Unknown => NOT_AVAILABLE.to_string(),
        }
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_is_fully_populated() {
        let record = ComponentRecord::default();
        assert_eq!(record.name, "Unknown Component");
        assert_eq!(record.version, "N/A");
        assert_eq!(record.vendor, "N/A");
        assert_eq!(record.copyright, "No copyright info");
        assert_eq!(record.provenance, "Unknown");
        assert_eq!(record.quality, QualityScore::Unknown);
        assert_eq!(record.health.last_updated, "N/A");
        assert!(record.package_identifier.is_none());
    }

    #[test]
    fn test_provenance_trimming() {
        assert_eq!(normalize_provenance("  DE \n"), "DE");
        assert_eq!(normalize_provenance("   "), "Unknown");
        assert_eq!(normalize_provenance(""), "Unknown");
    }

    #[test]
    fn test_health_value_from_json() {
        assert_eq!(HealthValue::from_json(Some(&json!(42))), HealthValue::Count(42));
        assert_eq!(HealthValue::from_json(Some(&json!("17"))), HealthValue::Count(17));
        assert_eq!(
            HealthValue::from_json(Some(&json!("lots"))),
            HealthValue::NotAvailable
        );
        assert_eq!(HealthValue::from_json(None), HealthValue::NotAvailable);
        assert_eq!(
            HealthValue::from_json(Some(&serde_json::Value::Null)),
            HealthValue::NotAvailable
        );
        assert_eq!(HealthValue::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_health_value_serializes_as_number_or_na() {
        let metrics = HealthMetrics {
            stars: HealthValue::Count(3),
            ..HealthMetrics::default()
        };
        let value = serde_json::to_value(&metrics).expect("serialize");
        assert_eq!(value["stars"], json!(3));
        assert_eq!(value["forks"], json!("N/A"));
    }

    #[test]
    fn test_quality_score_parsing() {
        assert_eq!(QualityScore::parse("4/5"), QualityScore::Numeric(4.0));
        assert_eq!(QualityScore::parse(" 3.5 "), QualityScore::Numeric(3.5));
        assert_eq!(QualityScore::parse("N/A"), QualityScore::Unknown);
        assert_eq!(QualityScore::parse(""), QualityScore::Unknown);
        assert_eq!(
            QualityScore::from_json(Some(&json!(5))),
            QualityScore::Numeric(5.0)
        );
        assert_eq!(QualityScore::from_json(Some(&json!([]))), QualityScore::Unknown);
    }

    #[test]
    fn test_quality_score_label() {
        assert_eq!(QualityScore::Numeric(5.0).label(), "5");
        assert_eq!(QualityScore::Numeric(2.5).label(), "2.5");
        assert_eq!(QualityScore::Unknown.label(), "N/A");
    }
}
