//! Dialect detection for SBOM documents.
//!
//! Detection is structural and ordered: a SCANOSS per-file map is recognized
//! first, then CycloneDX by its `bomFormat` marker, then SPDX by its
//! `spdxVersion` marker. Anything else is unrecognized and gets skipped.

use crate::model::Dialect;
use serde_json::Value;

/// CycloneDX marker key.
const BOM_FORMAT_KEY: &str = "bomFormat";
/// SPDX marker key.
const SPDX_VERSION_KEY: &str = "spdxVersion";

/// Result of dialect detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    /// Detected dialect
    pub dialect: Dialect,
    /// Declared format version when the dialect carries one
    pub version: Option<String>,
    /// Why detection failed, for unrecognized documents
    pub reason: Option<String>,
}

impl DetectionResult {
    /// Create a result indicating no dialect was detected.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            dialect: Dialect::Unrecognized,
            version: None,
            reason: Some(reason.into()),
        }
    }

    fn detected(dialect: Dialect, version: Option<&str>) -> Self {
        Self {
            dialect,
            version: version.map(str::to_string),
            reason: None,
        }
    }

    /// Check if the detected dialect can be normalized.
    pub fn can_parse(&self) -> bool {
        self.dialect.is_supported()
    }
}

/// Classify a parsed JSON root.
pub fn detect(root: &Value) -> DetectionResult {
    let Some(object) = root.as_object() else {
        return DetectionResult::unknown("document root is not a JSON object");
    };

    let has_markers = object.contains_key(BOM_FORMAT_KEY) || object.contains_key(SPDX_VERSION_KEY);
    if !has_markers && !object.is_empty() && object.values().all(Value::is_array) {
        return DetectionResult::detected(Dialect::ScanossNative, None);
    }

    if let Some(format) = object.get(BOM_FORMAT_KEY).and_then(Value::as_str) {
        if format.eq_ignore_ascii_case("cyclonedx") {
            let version = object.get("specVersion").and_then(Value::as_str);
            return DetectionResult::detected(Dialect::CycloneDx, version);
        }
    }

    if let Some(version) = object.get(SPDX_VERSION_KEY) {
        let version = version
            .as_str()
            .map(|v| v.trim_start_matches("SPDX-"));
        return DetectionResult::detected(Dialect::Spdx, version);
    }

    if object.is_empty() {
        DetectionResult::unknown("document is an empty JSON object")
    } else {
        DetectionResult::unknown("no SCANOSS, CycloneDX or SPDX markers found")
    }
}

/// Classify a parsed JSON root, returning only the dialect tag.
pub fn detect_dialect(root: &Value) -> Dialect {
    detect(root).dialect
}

/// Classify raw text. Malformed JSON is reported as [`Dialect::Unrecognized`].
pub fn detect_dialect_str(content: &str) -> Dialect {
    match serde_json::from_str::<Value>(content) {
        Ok(root) => detect_dialect(&root),
        Err(e) => {
            tracing::debug!("Dialect detection on malformed JSON: {}", e);
            Dialect::Unrecognized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_scanoss_native() {
        let root = json!({
            "src/main.c": [{"id": "file", "component": "openssl"}],
            "src/util.c": []
        });
        assert_eq!(detect_dialect(&root), Dialect::ScanossNative);
    }

    #[test]
    fn test_detect_cyclonedx_case_insensitive() {
        let root = json!({"bomFormat": "cycloneDX", "specVersion": "1.5", "components": []});
        let result = detect(&root);
        assert_eq!(result.dialect, Dialect::CycloneDx);
        assert_eq!(result.version.as_deref(), Some("1.5"));
        assert!(result.can_parse());
    }

    #[test]
    fn test_detect_spdx() {
        let root = json!({"spdxVersion": "SPDX-2.3", "packages": []});
        let result = detect(&root);
        assert_eq!(result.dialect, Dialect::Spdx);
        assert_eq!(result.version.as_deref(), Some("2.3"));
    }

    #[test]
    fn test_bom_format_blocks_scanoss_detection() {
        // All values are arrays, but the marker key rules out the per-file map.
        let root = json!({"bomFormat": [], "components": []});
        assert_eq!(detect_dialect(&root), Dialect::Unrecognized);
    }

    #[test]
    fn test_non_cyclonedx_bom_format_falls_through_to_spdx() {
        let root = json!({"bomFormat": "Other", "spdxVersion": "SPDX-2.2"});
        assert_eq!(detect_dialect(&root), Dialect::Spdx);
    }

    #[test]
    fn test_detect_unknown_format() {
        let result = detect(&json!({"some": "random", "json": "content"}));
        assert_eq!(result.dialect, Dialect::Unrecognized);
        assert!(!result.can_parse());
        assert!(result.reason.is_some());

        assert_eq!(detect_dialect(&json!({})), Dialect::Unrecognized);
        assert_eq!(detect_dialect(&json!([1, 2, 3])), Dialect::Unrecognized);
    }

    #[test]
    fn test_malformed_json_is_unrecognized() {
        assert_eq!(detect_dialect_str("{not json"), Dialect::Unrecognized);
        assert_eq!(detect_dialect_str(""), Dialect::Unrecognized);
        assert_eq!(
            detect_dialect_str(r#"{"spdxVersion": "SPDX-2.3"}"#),
            Dialect::Spdx
        );
    }
}
