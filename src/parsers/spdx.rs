//! SPDX JSON normalizer.
//!
//! Reads the `packages` array. SPDX packages carry no cryptography, health or
//! quality data, so those facts keep their defaults.

use super::fields::{array_items, container, str_field, string_or, type_name};
use crate::model::{
    ComponentRecord, Dialect, LicenseFact, NOT_AVAILABLE, NO_COPYRIGHT, UNKNOWN_COMPONENT,
};
use crate::parsers::traits::{ComponentNormalizer, ParseError};
use serde_json::Value;

/// Normalizer for SPDX JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxParser;

impl SpdxParser {
    /// Create a new SPDX normalizer
    pub fn new() -> Self {
        Self
    }

    /// Convert a single SPDX package.
    fn convert_package(&self, pkg: &Value) -> ComponentRecord {
        ComponentRecord {
            name: string_or(pkg, "name", UNKNOWN_COMPONENT),
            version: string_or(pkg, "versionInfo", NOT_AVAILABLE),
            vendor: Self::supplier(pkg).unwrap_or(NOT_AVAILABLE).to_string(),
            package_identifier: Self::purl(pkg),
            licenses: Self::license(pkg).map(LicenseFact::new).into_iter().collect(),
            copyright: asserted(pkg, "copyrightText")
                .unwrap_or(NO_COPYRIGHT)
                .to_string(),
            ..ComponentRecord::default()
        }
    }

    /// Supplier with its `Organization:` / `Person:` prefix stripped.
    fn supplier(pkg: &Value) -> Option<&str> {
        let supplier = asserted(pkg, "supplier")?;
        let name = supplier
            .strip_prefix("Organization:")
            .or_else(|| supplier.strip_prefix("Person:"))
            .unwrap_or(supplier)
            .trim();
        (!name.is_empty() && name != "NOASSERTION").then_some(name)
    }

    /// Concluded license, falling back to the declared one.
    fn license(pkg: &Value) -> Option<&str> {
        asserted(pkg, "licenseConcluded").or_else(|| asserted(pkg, "licenseDeclared"))
    }

    fn purl(pkg: &Value) -> Option<String> {
        array_items(pkg, "externalRefs")
            .iter()
            .filter(|r| str_field(r, "referenceType") == Some("purl"))
            .find_map(|r| str_field(r, "referenceLocator"))
            .map(str::to_string)
    }
}

/// String field that is neither `NOASSERTION` nor `NONE`.
fn asserted<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    str_field(value, key).filter(|s| *s != "NOASSERTION" && *s != "NONE")
}

impl ComponentNormalizer for SpdxParser {
    fn dialect(&self) -> Dialect {
        Dialect::Spdx
    }

    fn normalize(&self, root: &Value) -> Result<Vec<ComponentRecord>, ParseError> {
        let packages = container(root, "packages")
            .map(Option::unwrap_or_default)
            .map_err(|found| {
                ParseError::malformed(format!("'packages' must be an array, found {found}"))
            })?;

        packages
            .iter()
            .enumerate()
            .map(|(index, pkg)| {
                if pkg.is_object() {
                    Ok(self.convert_package(pkg))
                } else {
                    Err(ParseError::malformed(format!(
                        "package {index} must be an object, found {}",
                        type_name(pkg)
                    )))
                }
            })
            .collect()
    }
}
