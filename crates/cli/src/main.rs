//! userlint command-line tool.
//!
//! Checks the author and committer names and email addresses in a git
//! history and suggests `.mailmap` lines for the malformed ones. Exits with
//! status 1 when any invalid identity was found.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use userlint_core::config::AppConfig;
use userlint_core::git::GitHistory;
use userlint_core::{Audit, Classifier, TldTable};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Check git author and committer identities for malformed names and emails.
#[derive(Parser, Debug)]
#[command(name = "userlint", version, about)]
struct Cli {
    /// Path to the git repository.
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Revision to start walking history from (default from config, else HEAD).
    revision: Option<String>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Public suffix list used to validate email domains.
    #[arg(long)]
    suffix_list: Option<PathBuf>,

    /// Print debug output.
    #[arg(long, conflicts_with = "quiet")]
    debug: bool,

    /// Only print warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_target(false)
        .without_time()
        .init();

    match run(&cli, &config) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<u8> {
    let tlds = TldTable::global(&config.tld.suffix_list)
        .context("failed to load public suffix list")?;
    let history = GitHistory::open(&cli.directory).context("failed to open repository")?;

    let report = Audit::new(Classifier::new(tlds))
        .run(&history, &config.scan.revision)
        .with_context(|| format!("failed to scan history from '{}'", config.scan.revision))?;

    if report.has_invalid() {
        warn!("{}", report.summary());
    } else {
        info!("{}", report.summary());
    }
    for ambiguity in &report.ambiguities {
        warn!("{}", ambiguity);
    }
    if let Some(mailmap) = report.mailmap() {
        info!("{}", mailmap);
    }

    Ok(report.exit_status())
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// Load the config file (if any) and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            AppConfig::load_from_file(path).context("failed to load configuration file")?
        }
        None => AppConfig::default(),
    };

    if let Some(revision) = &cli.revision {
        config.scan.revision = revision.clone();
    }
    if let Some(path) = &cli.suffix_list {
        config.tld.suffix_list = path.clone();
    }
    if cli.debug {
        config.log.level = "debug".into();
    } else if cli.quiet {
        config.log.level = "warn".into();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
