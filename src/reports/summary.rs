//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportInput, ReportType};
use crate::aggregate::RankedEntry;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn top_line(&self, label: &str, entries: &[RankedEntry], empty: &str) -> String {
        let body = if entries.is_empty() {
            self.color(&format!("No {empty} data available."), "dim")
        } else {
            entries
                .iter()
                .take(3)
                .map(|e| format!("{} ({})", e.value, e.count))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("  {}  {body}", self.color(label, "cyan"))
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_report(
        &self,
        input: &ReportInput<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let aggregate = input.aggregate;
        let counts = &aggregate.counts;
        let mut lines = Vec::new();

        // Header
        lines.push(self.color(config.title(), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} processed, {} skipped",
            self.color("Documents:", "cyan"),
            counts.documents,
            counts.skipped
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Components:", "cyan"),
            counts.records
        ));

        if config.includes(ReportType::Summary) {
            lines.push(String::new());
            lines.push(self.color("Top facts:", "bold"));
            lines.push(self.top_line("Licenses:", &aggregate.licenses, "license"));
            lines.push(self.top_line(
                "Crypto:",
                &aggregate.crypto_algorithms,
                "cryptography",
            ));
            lines.push(self.top_line("Quality:", &aggregate.quality_scores, "quality"));
            lines.push(self.top_line("Provenance:", &aggregate.provenance, "provenance"));
        }

        if config.includes(ReportType::Vulnerabilities) {
            lines.push(String::new());
            let n = aggregate.vulnerabilities.len();
            if n == 0 {
                lines.push(self.color("No vulnerabilities were detected.", "green"));
            } else {
                lines.push(format!(
                    "{} {}",
                    self.color(&format!("!{n}"), "red"),
                    plural(n, "vulnerability", "vulnerabilities")
                ));
                for v in aggregate.vulnerabilities.iter().take(5) {
                    lines.push(format!(
                        "  {} {} ({} {})",
                        v.cve_id,
                        self.color(&v.severity, "yellow"),
                        v.component,
                        v.version
                    ));
                }
                if n > 5 {
                    lines.push(self.color(&format!("  … and {} more", n - 5), "dim"));
                }
            }
        }

        if let Some(scan) = input.scan.filter(|_| config.includes(ReportType::Scan)) {
            let stats = &scan.stats;
            lines.push(String::new());
            lines.push(self.color("Lookups:", "bold"));
            lines.push(format!(
                "  {} ok, {} timed out, {} failed",
                self.color(&stats.succeeded.to_string(), "green"),
                self.color(&stats.timed_out.to_string(), "yellow"),
                self.color(&stats.failed.to_string(), "red")
            ));
        }

        if !input.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Skipped:", "bold"));
            for diag in input.diagnostics {
                lines.push(format!("  {}", self.color(&diag.to_string(), "dim")));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
