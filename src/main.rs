//! Sumi-Linkcheck main entry point
//!
//! This is the command-line interface for the Sumi-Linkcheck broken link crawler.

use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use sumi_linkcheck::config::{apply_overrides, load_config_with_hash, Config, Overrides};
use sumi_linkcheck::crawler::Coordinator;
use sumi_linkcheck::output::{handlers_from_config, print_summary, write_all};
use sumi_linkcheck::url::parse_seed;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Sumi-Linkcheck: a single-domain broken link crawler
///
/// Sumi-Linkcheck visits every page reachable from the seed URL on the seed's
/// own host, records every link that fails to load, and writes the broken
/// links to a JSON report.
#[derive(Parser, Debug)]
#[command(name = "sumi-linkcheck")]
#[command(version)]
#[command(about = "A single-domain broken link crawler", long_about = None)]
struct Cli {
    /// URL of the website to crawl (prompted for when omitted)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent workers (1-16)
    #[arg(short, long)]
    workers: Option<u32>,

    /// Per-page fetch timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path of the JSON broken-link report
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and the seed URL without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_linkcheck=info,warn"),
            1 => EnvFilter::new("sumi_linkcheck=debug,info"),
            2 => EnvFilter::new("sumi_linkcheck=trace,debug"),
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

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, config_hash) = load_settings(&cli)?;

    let raw_seed = match &cli.seed {
        Some(seed) => seed.clone(),
        None => prompt_seed().context("Failed to read the seed URL")?,
    };
    let seed =
        parse_seed(&raw_seed).with_context(|| format!("Invalid seed URL '{}'", raw_seed.trim()))?;

    if cli.dry_run {
        print_dry_run(&config, &seed);
        return Ok(());
    }

    let coordinator =
        Coordinator::from_config(&config).context("Failed to initialize the crawler")?;
    let result = coordinator
        .crawl(&seed)
        .await
        .with_context(|| format!("Crawl of {} failed", seed))?;

    let handlers = handlers_from_config(&config, config_hash.as_deref());
    write_all(&handlers, &result).context("Failed to write crawl report")?;
    tracing::info!(
        "Broken links written to {}",
        config.output.broken_links_path
    );

    print_summary(&result);

    Ok(())
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let overrides = Overrides {
        workers: cli.workers,
        fetch_timeout_secs: cli.timeout,
        broken_links_path: cli.output.clone(),
    };
    let config = apply_overrides(config, &overrides).context("Invalid settings")?;
    Ok((config, hash))
}

/// Asks for the seed URL on stdin
fn prompt_seed() -> std::io::Result<String> {
    print!("Enter the URL of the website to crawl: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Handles the --dry-run mode: shows what would be crawled
fn print_dry_run(config: &Config, seed: &Url) {
    println!("=== Sumi-Linkcheck Dry Run ===\n");

    println!("Seed: {}", seed);
    if let Some(host) = seed.host_str() {
        println!("  Domain boundary: {}", host);
    }

    println!("\nCrawler Configuration:");
    println!("  Workers: {}", config.crawler.effective_workers());
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Max redirects: {}", config.crawler.max_redirects);

    println!("\nUser Agent: {}", config.user_agent.user_agent_string());

    println!("\nOutput:");
    println!("  Broken links: {}", config.output.broken_links_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
}
