//! Default values shared by the configuration types and the CLI.

/// Rows kept in the long tables (licenses, algorithms, quality, health).
pub const DEFAULT_TABLE_LIMIT: usize = 10;

/// Rows kept in the short summary tables (components, provenance, copyright sample).
pub const DEFAULT_SHORT_TABLE_LIMIT: usize = 5;

/// Wall-clock limit of one external lookup, in seconds.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Lookup program used when none is configured.
pub const DEFAULT_LOOKUP_PROGRAM: &str = "scanoss-py";

/// Argument template of the default lookup program.
pub const DEFAULT_LOOKUP_ARGS: &[&str] = &["component", "vulns", "--purl", "{purl}"];

/// Placeholder replaced by the package identifier in lookup arguments.
pub const PURL_PLACEHOLDER: &str = "{purl}";

/// Primary credential variable.
pub const DEFAULT_API_KEY_ENV: &str = "SBOM_DIGEST_API_KEY";

/// Credential variable consulted when the configured one is unset.
///
/// The credential is handed to the lookup tool under this name.
pub const FALLBACK_API_KEY_ENV: &str = "SCANOSS_API_KEY";

/// Identifier list written before a scan starts.
pub const DEFAULT_PURLS_FILE: &str = "purls.txt";
