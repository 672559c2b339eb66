//! sbom-digest: SBOM fact extraction and vulnerability lookup tool
//!
//! Normalizes SCANOSS, `CycloneDX` and SPDX documents and summarizes them.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_digest::{
    cli,
    config::{load_or_default, AppConfig, AppConfigBuilder},
    pipeline::{exit_codes, sbom_paths},
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported SBOM Formats:",
        "\n  SCANOSS:   per-file scan results (JSON)",
        "\n  CycloneDX: 1.4, 1.5, 1.6 (JSON)",
        "\n  SPDX:      2.2, 2.3 (JSON)",
        "\n\nOutput Formats:",
        "\n  markdown, json, summary"
    )
}

#[derive(Parser)]
#[command(name = "sbom-digest")]
#[command(version, long_version = build_long_version())]
#[command(about = "SBOM fact extraction, aggregation and vulnerability lookup", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  Vulnerabilities found (with --fail-on-vuln)
    3  Error occurred

EXAMPLES:
    # Summarize a batch of scan results and SBOMs
    sbom-digest summary results.json app.cdx.json lib.spdx.json

    # CI/CD pipeline check
    sbom-digest vulns app.cdx.json -o summary --fail-on-vuln

    # Look up every package URL with a 20 second timeout each
    sbom-digest scan app.cdx.json --timeout 20 -o json > scan.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every report-producing command
#[derive(Parser)]
struct ReportArgs {
    /// Input documents (`.json` / `.spdx`); other files are ignored
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 2 if any vulnerability is found
    #[arg(long)]
    fail_on_vuln: bool,
}

/// Arguments for the `scan` subcommand
#[derive(Parser)]
struct ScanArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Lookup program to run for each package URL
    #[arg(long)]
    program: Option<String>,

    /// Per-identifier timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Number of lookups to run at once
    #[arg(long)]
    workers: Option<usize>,

    /// Where to write the package URL list
    #[arg(long)]
    purls_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize licenses, cryptography, quality, health and provenance
    Summary(ReportArgs),

    /// List vulnerabilities embedded in CycloneDX documents
    Vulns(ReportArgs),

    /// Look up every package URL with an external vulnerability tool
    Scan(ScanArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-digest.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Summary(args) => {
            let config = build_config(cli.config.as_deref(), cli.quiet, cli.no_color, &args)?;
            cli::run_summary(&config, &sbom_paths(args.files))
        }

        Commands::Vulns(args) => {
            let config = build_config(cli.config.as_deref(), cli.quiet, cli.no_color, &args)?;
            cli::run_vulns(&config, &sbom_paths(args.files))
        }

        Commands::Scan(args) => {
            let config = AppConfigBuilder::from_config(build_config(
                cli.config.as_deref(),
                cli.quiet,
                cli.no_color,
                &args.report,
            )?)
            .scan_program(args.program)
            .scan_timeout_secs(args.timeout)
            .scan_workers(args.workers)
            .purls_file(args.purls_file)
            .build();
            cli::run_scan(&config, &sbom_paths(args.report.files))
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-digest", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = sbom_digest::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Layer CLI flags over the discovered config file.
fn build_config(
    config_path: Option<&Path>,
    quiet: bool,
    no_color: bool,
    args: &ReportArgs,
) -> Result<AppConfig> {
    let (file_config, loaded_from) = load_or_default(config_path)?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(AppConfigBuilder::from_config(file_config)
        .output_format(args.output)
        .output_file(args.output_file.clone())
        .fail_on_vuln(args.fail_on_vuln)
        .quiet(quiet)
        .no_color(no_color)
        .build())
}

fn run_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = load_or_default(config_path)?;
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("sbom-digest").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in sbom_digest::config::file::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match sbom_digest::config::discover_config_file(config_path) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-digest.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = sbom_digest::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
