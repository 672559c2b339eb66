//! Canonical data model.
//!
//! Every dialect is normalized into [`ComponentRecord`] values before any fact
//! extraction or aggregation happens. Vulnerability data keeps its own shape
//! in [`VulnerabilityFact`] because only some dialects carry it.

mod document;
mod record;
mod vulnerability;

pub use document::*;
pub use record::*;
pub use vulnerability::*;
