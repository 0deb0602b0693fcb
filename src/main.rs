//! Wiki-Harvest main entry point
//!
//! This is the command-line interface for the Wiki-Harvest page harvester.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_harvest::config::{load_config_with_hash, Config};
use wiki_harvest::crawler::{resolve_addresses, run_harvest};
use wiki_harvest::output::analysis::print_summary;
use wiki_harvest::output::run_analysis;
use wiki_harvest::url::validate_address;

/// Wiki-Harvest: a sequential Wikipedia page harvester
///
/// Wiki-Harvest fetches Wikipedia pages one at a time, extracts their
/// content, tables and references, resolves table footnotes against the
/// reference list and writes JSON, CSV and text reports.
#[derive(Parser, Debug)]
#[command(name = "wiki-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A sequential Wikipedia page harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Harvest this single address instead of the configured input
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with = "analyze")]
    dry_run: bool,

    /// Build analysis reports from the output directory and exit
    #[arg(long, conflicts_with_all = ["dry_run", "url"])]
    analyze: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    if let Some(url) = &cli.url {
        if let Err(reason) = validate_address(url) {
            bail!("Invalid --url {}: {}", url, reason);
        }
    }

    if cli.dry_run {
        handle_dry_run(&config, cli.url.as_deref());
    } else if cli.analyze {
        handle_analyze(&config)?;
    } else {
        handle_harvest(config, config_hash, cli.url.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_harvest=info,warn"),
            1 => EnvFilter::new("wiki_harvest=debug,info"),
            2 => EnvFilter::new("wiki_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the configuration and resolved input
fn handle_dry_run(config: &Config, url: Option<&str>) {
    println!("=== Wiki-Harvest Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!("  Delay between requests: {}ms", config.scraper.delay_ms);
    println!("  Request timeout: {}s", config.scraper.timeout_secs);
    println!("  Max pages: {}", config.scraper.max_pages);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.output_dir);
    println!("  Enhanced CSV: {}", config.output.enhanced_csv);
    println!("  Page reports: {}", config.output.page_reports);
    println!("  Run report: {}", config.output.run_report);
    println!("  Analysis reports: {}", config.output.reports_dir);

    let addresses = resolve_addresses(config, url);
    println!("\nInput Addresses ({}):", addresses.len());
    for address in &addresses {
        println!("  - {}", address);
    }

    println!("\n✓ Configuration is valid");
    if addresses.is_empty() {
        println!("✗ No input addresses found; a harvest would stop immediately");
    } else {
        println!("✓ Would harvest {} addresses", addresses.len());
    }
}

/// Handles the --analyze mode: builds reports from earlier output
fn handle_analyze(config: &Config) -> anyhow::Result<()> {
    let pages_dir = Path::new(&config.output.output_dir);
    let reports_dir = Path::new(&config.output.reports_dir);

    println!("=== Analyzing Harvested Pages ===\n");
    println!("Pages: {}", pages_dir.display());

    let summary = run_analysis(pages_dir, reports_dir)
        .with_context(|| format!("Analysis of {} failed", pages_dir.display()))?;
    print_summary(&summary, reports_dir);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    config_hash: Option<String>,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let output_dir = config.output.output_dir.clone();

    let index = match run_harvest(config, config_hash, url).await {
        Ok(index) => index,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e).context("Harvest failed");
        }
    };

    println!("\n=== Harvest Complete ===");
    println!("  Addresses attempted: {}", index.total_pages);
    println!("  Pages saved: {}", index.successful_pages);
    println!("  Errors: {}", index.errors);
    println!("  Output: {}", output_dir);

    Ok(())
}
