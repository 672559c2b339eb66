//! SBOM dialect normalizers.
//!
//! Converts SCANOSS result maps, CycloneDX JSON and SPDX JSON into the
//! canonical [`ComponentRecord`] representation.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_digest::parsers::{detect_dialect, normalize_document};
//! use sbom_digest::model::RawDocument;
//!
//! let content = std::fs::read_to_string("bom.json").unwrap();
//! let root: serde_json::Value = serde_json::from_str(&content).unwrap();
//! let dialect = detect_dialect(&root);
//! let doc = RawDocument::new("bom.json", root, dialect);
//! let records = normalize_document(&doc).unwrap();
//! println!("{} components", records.len());
//! ```

mod cyclonedx;
mod detection;
mod fields;
mod scanoss;
mod spdx;
mod traits;

pub use cyclonedx::CycloneDxParser;
pub use detection::{detect, detect_dialect, detect_dialect_str, DetectionResult};
pub use fields::{
    array_items, container, first_item, scalar_text, str_field, string_or, type_name,
};
pub use scanoss::ScanossParser;
pub use spdx::SpdxParser;
pub use traits::{ComponentNormalizer, ParseError};

use crate::model::{ComponentRecord, Dialect, RawDocument};

/// Pick the normalizer for a dialect.
pub fn normalizer_for(dialect: Dialect) -> Option<Box<dyn ComponentNormalizer>> {
    match dialect {
        Dialect::ScanossNative => Some(Box::new(ScanossParser::new())),
        Dialect::CycloneDx => Some(Box::new(CycloneDxParser::new())),
        Dialect::Spdx => Some(Box::new(SpdxParser::new())),
        Dialect::Unrecognized => None,
    }
}

/// Normalize one loaded document into records, one per component entry.
pub fn normalize_document(doc: &RawDocument) -> Result<Vec<ComponentRecord>, ParseError> {
    let normalizer = normalizer_for(doc.dialect()).ok_or_else(|| {
        ParseError::UnknownDialect(format!("{} is not a supported SBOM", doc.origin()))
    })?;
    let records = normalizer.normalize(doc.root())?;
    tracing::debug!(
        "{}: {} records from {} document",
        doc.origin(),
        records.len(),
        normalizer.dialect()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_dispatches_on_dialect() {
        let root = json!({"bomFormat": "CycloneDX", "components": [{"name": "a"}, {"name": "b"}]});
        let dialect = detect_dialect(&root);
        let doc = RawDocument::new("bom.json", root, dialect);
        let records = normalize_document(&doc).expect("normalize");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unrecognized_document_is_rejected() {
        let doc = RawDocument::new("x.json", json!({"foo": "bar"}), Dialect::Unrecognized);
        let err = normalize_document(&doc).unwrap_err();
        assert!(matches!(err, ParseError::UnknownDialect(_)));
    }

    #[test]
    fn test_normalizer_for_reports_its_dialect() {
        for dialect in [Dialect::ScanossNative, Dialect::CycloneDx, Dialect::Spdx] {
            let normalizer = normalizer_for(dialect).expect("supported");
            assert_eq!(normalizer.dialect(), dialect);
        }
        assert!(normalizer_for(Dialect::Unrecognized).is_none());
    }
}
