//! CycloneDX JSON normalizer.
//!
//! Reads the top-level `components` array. Vulnerabilities are left to
//! [`crate::extract::vulnerabilities`], which walks the same tree.

use super::fields::{array_items, container, scalar_text, str_field, string_or, type_name};
use crate::model::{
    ComponentRecord, CryptoFact, Dialect, LicenseFact, NOT_AVAILABLE, NO_COPYRIGHT,
    UNKNOWN_ALGORITHM, UNKNOWN_COMPONENT, UNKNOWN_LICENSE,
};
use crate::parsers::traits::{ComponentNormalizer, ParseError};
use serde_json::Value;

/// Component type used by CycloneDX 1.6 for cryptographic assets.
const CRYPTO_ASSET_TYPE: &str = "cryptographic-asset";

/// Normalizer for CycloneDX JSON BOMs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    /// Create a new CycloneDX normalizer
    pub fn new() -> Self {
        Self
    }

    /// Borrow the `components` array of a BOM.
    ///
    /// A BOM without components is valid and yields an empty slice.
    pub fn components(root: &Value) -> Result<&[Value], ParseError> {
        container(root, "components")
            .map(Option::unwrap_or_default)
            .map_err(|found| {
                ParseError::malformed(format!("'components' must be an array, found {found}"))
            })
    }

    /// Convert a single CycloneDX component.
    fn convert_component(&self, comp: &Value) -> ComponentRecord {
        ComponentRecord {
            name: string_or(comp, "name", UNKNOWN_COMPONENT),
            version: string_or(comp, "version", NOT_AVAILABLE),
            vendor: Self::vendor(comp).unwrap_or(NOT_AVAILABLE).to_string(),
            package_identifier: str_field(comp, "purl").map(str::to_string),
            licenses: Self::licenses(comp),
            cryptography: Self::cryptography(comp),
            copyright: string_or(comp, "copyright", NO_COPYRIGHT),
            ..ComponentRecord::default()
        }
    }

    /// Supplier name, then publisher, then author.
    fn vendor(comp: &Value) -> Option<&str> {
        comp.get("supplier")
            .and_then(|s| str_field(s, "name"))
            .or_else(|| str_field(comp, "publisher"))
            .or_else(|| str_field(comp, "author"))
    }

    /// License choices: `{license: {id|name}}`, `{expression}`, or a bare `{name}`.
    fn licenses(comp: &Value) -> Vec<LicenseFact> {
        array_items(comp, "licenses")
            .iter()
            .map(|choice| {
                let name = choice
                    .get("license")
                    .and_then(|lic| str_field(lic, "id").or_else(|| str_field(lic, "name")))
                    .or_else(|| str_field(choice, "expression"))
                    .or_else(|| str_field(choice, "name"))
                    .unwrap_or(UNKNOWN_LICENSE);
                LicenseFact::new(name)
            })
            .collect()
    }

    fn cryptography(comp: &Value) -> Vec<CryptoFact> {
        let mut facts: Vec<CryptoFact> = array_items(comp, "cryptography")
            .iter()
            .map(|crypto| {
                CryptoFact::new(
                    string_or(crypto, "algorithm", UNKNOWN_ALGORITHM),
                    scalar_text(crypto, "strength"),
                )
            })
            .collect();

        if str_field(comp, "type") == Some(CRYPTO_ASSET_TYPE) {
            if let Some(props) = comp.get("cryptoProperties") {
                if str_field(props, "assetType").map_or(true, |t| t == "algorithm") {
                    let strength = props
                        .get("algorithmProperties")
                        .and_then(|alg| scalar_text(alg, "classicalSecurityLevel"));
                    facts.push(CryptoFact::new(
                        string_or(comp, "name", UNKNOWN_ALGORITHM),
                        strength,
                    ));
                }
            }
        }
        facts
    }
}

impl ComponentNormalizer for CycloneDxParser {
    fn dialect(&self) -> Dialect {
        Dialect::CycloneDx
    }

    fn normalize(&self, root: &Value) -> Result<Vec<ComponentRecord>, ParseError> {
        let components = Self::components(root)?;
        components
            .iter()
            .enumerate()
            .map(|(index, comp)| {
                if comp.is_object() {
                    Ok(self.convert_component(comp))
                } else {
                    Err(ParseError::malformed(format!(
                        "component {index} must be an object, found {}",
                        type_name(comp)
                    )))
                }
            })
            .collect()
    }
}
