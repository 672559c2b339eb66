//! Normalizer trait definitions and error types.

use crate::model::{ComponentRecord, Dialect};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading or normalizing one document.
///
/// None of these abort a batch; the pipeline turns them into skip diagnostics.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Unknown SBOM dialect: {0}")]
    UnknownDialect(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl ParseError {
    /// Shorthand for a container-shape error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }
}

/// Converts the JSON tree of one dialect into canonical records.
///
/// Implementations never fail on a missing field; they fail only when a
/// dialect container has the wrong JSON type entirely.
pub trait ComponentNormalizer {
    /// The dialect this normalizer understands.
    fn dialect(&self) -> Dialect;

    /// Produce one record per component entry, in document order.
    fn normalize(&self, root: &Value) -> Result<Vec<ComponentRecord>, ParseError>;
}
