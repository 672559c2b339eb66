//! Loading one input file into a [`RawDocument`].

use crate::model::RawDocument;
use crate::parsers::{detect, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a document was left out of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    UnreadableFile,
    MalformedJson,
    Unrecognized,
    MalformedDocument,
}

impl SkipKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnreadableFile => "unreadable file",
            Self::MalformedJson => "malformed JSON",
            Self::Unrecognized => "unrecognized format",
            Self::MalformedDocument => "malformed document",
        }
    }
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&ParseError> for SkipKind {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::IoError(_) => Self::UnreadableFile,
            ParseError::JsonError(_) => Self::MalformedJson,
            ParseError::UnknownDialect(_) => Self::Unrecognized,
            ParseError::MalformedDocument(_) => Self::MalformedDocument,
        }
    }
}

/// A document skipped during a batch, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: SkipKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, err: &ParseError) -> Self {
        Self {
            path: path.into(),
            kind: SkipKind::from(err),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path.display(), self.kind, self.message)
    }
}

/// Read, parse and classify one file.
///
/// Unrecognized documents are reported as [`ParseError::UnknownDialect`];
/// every returned document has a supported dialect.
pub fn load_document(path: &Path) -> Result<RawDocument, ParseError> {
    let bytes = std::fs::read(path)?;
    let root: serde_json::Value = serde_json::from_slice(&bytes)?;

    let detection = detect(&root);
    if !detection.can_parse() {
        let reason = detection
            .reason
            .unwrap_or_else(|| "unsupported format".to_string());
        return Err(ParseError::UnknownDialect(reason));
    }

    tracing::debug!(
        "{}: detected {}{}",
        path.display(),
        detection.dialect,
        detection
            .version
            .as_deref()
            .map(|v| format!(" {v}"))
            .unwrap_or_default()
    );
    Ok(RawDocument::new(path, root, detection.dialect))
}
