//! mv-scout main entry point
//!
//! This is the command-line interface for the mv-scout market-value crawler.

use anyhow::Context;
use clap::Parser;
use mv_scout::config::{load_config_with_hash, validate, Config};
use mv_scout::crawler::{crawl, page_url};
use mv_scout::output::{dataset_statistics, print_statistics, Dataset};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// mv-scout: a market-value ranking crawler
///
/// mv-scout walks the pages of a football market-value ranking, extracts one
/// record per ranked player, and writes the records as a JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "mv-scout")]
#[command(version = "1.0.0")]
#[command(about = "A market-value ranking crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First page index to crawl
    #[arg(long, value_name = "N")]
    first_page: Option<u32>,

    /// Last page index to crawl (inclusive)
    #[arg(long, value_name = "N")]
    last_page: Option<u32>,

    /// Number of pages fetched concurrently
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Dataset output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Retries per page for transient failures
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "lookup"])]
    dry_run: bool,

    /// Show statistics from the existing dataset and exit
    #[arg(long, conflicts_with_all = ["dry_run", "lookup"])]
    stats: bool,

    /// Look up one player in the existing dataset and exit
    #[arg(long, value_name = "NAME", conflicts_with_all = ["dry_run", "stats"])]
    lookup: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(first) = self.first_page {
            config.crawler.first_page = first;
        }
        if let Some(last) = self.last_page {
            config.crawler.last_page = last;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.max_concurrent_pages = concurrency;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(timeout) = self.timeout {
            config.crawler.request_timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            config.crawler.max_retries = retries;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    // Overrides go on before validation so a flag can repair a file value
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(name) = &cli.lookup {
        handle_lookup(&config, name)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mv_scout=info,warn"),
            1 => EnvFilter::new("mv_scout=debug,info"),
            2 => EnvFilter::new("mv_scout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== mv-scout Dry Run ===\n");

    let crawler = &config.crawler;
    println!("Crawler Configuration:");
    println!("  Base URL: {}", crawler.base_url);
    println!(
        "  Pages: {}..={} ({} pages)",
        crawler.first_page,
        crawler.last_page,
        crawler.page_count()
    );
    println!("  Max concurrent pages: {}", crawler.max_concurrent_pages);
    println!("  Request timeout: {}s", crawler.request_timeout_secs);
    println!(
        "  Retries: {} (delay {}ms)",
        crawler.max_retries, crawler.retry_delay_ms
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.path);

    println!("\nFirst and last URLs:");
    println!("  {}", page_url(&crawler.base_url, crawler.first_page)?);
    println!("  {}", page_url(&crawler.base_url, crawler.last_page)?);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} pages", crawler.page_count());

    Ok(())
}

/// Handles the --stats mode: shows statistics from the existing dataset
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Dataset: {}\n", config.output.path);

    let dataset = Dataset::load(Path::new(&config.output.path))?;
    print_statistics(&dataset_statistics(dataset.records()));

    Ok(())
}

/// Handles the --lookup mode: prints one player's record as JSON
fn handle_lookup(config: &Config, name: &str) -> anyhow::Result<()> {
    let dataset = Dataset::load(Path::new(&config.output.path))?;

    match dataset.find_player(name) {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(record)?);
            Ok(())
        }
        None => anyhow::bail!(
            "No player named '{}' in {} ({} records)",
            name,
            config.output.path,
            dataset.len()
        ),
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let stop = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping crawl and saving gathered records");
        } else {
            // No signal handler available; never stop early
            std::future::pending::<()>().await;
        }
    };

    match crawl(config, stop).await {
        Ok(report) => {
            tracing::info!(
                "Crawl started {} completed: {} records from {}/{} pages ({:.1}% success) in {:.1}s",
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.records.len(),
                report.pages_succeeded,
                report.pages_total,
                report.success_rate(),
                report.elapsed.as_secs_f64()
            );
            if !report.failures.is_empty() {
                tracing::warn!("Skipped pages: {:?}", report.failed_pages());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
