//! Raw input documents and their detected dialect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// SBOM dialects understood by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// SCANOSS scanner output: a map of file path to a list of match entries
    ScanossNative,
    /// CycloneDX JSON document with a `components` array
    CycloneDx,
    /// SPDX JSON document with a `packages` array
    Spdx,
    /// Anything else, including malformed JSON
    Unrecognized,
}

impl Dialect {
    /// Human-readable dialect name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScanossNative => "SCANOSS",
            Self::CycloneDx => "CycloneDX",
            Self::Spdx => "SPDX",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether documents of this dialect can be normalized.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed JSON document together with its detected dialect.
///
/// The tree is never mutated after loading; normalizers only read from it.
#[derive(Debug, Clone)]
pub struct RawDocument {
    path: PathBuf,
    root: serde_json::Value,
    dialect: Dialect,
}

impl RawDocument {
    /// Wrap an already-parsed JSON tree.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: serde_json::Value, dialect: Dialect) -> Self {
        Self {
            path: path.into(),
            root,
            dialect,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn root(&self) -> &serde_json::Value {
        &self.root
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Path rendered for reports and diagnostics.
    #[must_use]
    pub fn origin(&self) -> String {
        self.path.display().to_string()
    }
}
