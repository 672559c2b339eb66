//! Package identifier collection for lookups.

use crate::error::{ErrorContext, Result};
use crate::model::ComponentRecord;
use indexmap::IndexSet;
use packageurl::PackageUrl;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Distinct package identifiers in order of first appearance.
///
/// Blank identifiers are dropped. Identifiers that do not parse as package
/// URLs are kept, with a warning.
pub fn collect_package_identifiers<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ComponentRecord>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for record in records {
        let Some(id) = record.package_identifier.as_deref().map(str::trim) else {
            continue;
        };
        if id.is_empty() || seen.contains(id) {
            continue;
        }
        if let Err(e) = PackageUrl::from_str(id) {
            tracing::warn!("Identifier for {} is not a valid package URL ({e}): {id}", record.name);
        }
        seen.insert(id.to_string());
    }
    seen.into_iter().collect()
}

/// Write identifiers one per line.
pub fn write_identifier_list(path: &Path, identifiers: &[String]) -> Result<()> {
    let mut contents = identifiers.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)
        .map_err(|e| crate::error::DigestError::io(path, e))
        .context("writing package identifier list")?;
    tracing::info!("Wrote {} identifiers to {}", identifiers.len(), path.display());
    Ok(())
}

/// Read an identifier list written by [`write_identifier_list`] or by hand.
///
/// Blank lines and `#` comments are skipped; duplicates are removed.
pub fn read_identifier_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| crate::error::DigestError::io(path, e))
        .context("reading package identifier list")?;
    let ids: IndexSet<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect();
    Ok(ids.into_iter().collect())
}
