//! Vulnerability lookups against an external tool.
//!
//! Package identifiers collected from CycloneDX records are handed, one at a
//! time, to a [`LookupTool`]. Every lookup is bounded by a timeout and its
//! outcome (success, timeout, or failure) is recorded individually in a
//! [`ScanReport`].
//!
//! ```rust,ignore
//! use sbom_digest::scan::{CommandLookup, ScanOrchestrator};
//! use sbom_digest::config::ScanConfig;
//!
//! let config = ScanConfig::default();
//! let orchestrator = ScanOrchestrator::from_config(CommandLookup::from_config(&config), &config);
//! let report = orchestrator.run(&["pkg:npm/lodash@4.17.21".to_string()]);
//! ```

mod orchestrator;
mod purls;
mod stats;
mod tool;

pub use orchestrator::{LookupOutcome, LookupResult, ScanOrchestrator, ScanReport};
pub use purls::{collect_package_identifiers, read_identifier_list, write_identifier_list};
pub use stats::ScanStats;
pub use tool::{resolve_credential, CommandLookup, LookupError, LookupTool};
