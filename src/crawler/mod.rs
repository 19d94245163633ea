//! Crawler module for listing page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing pages
//! - Overall crawl coordination (ordering, retries, failure isolation)
//! - The end-to-end crawl that persists the dataset

mod coordinator;
mod fetcher;

pub use coordinator::{
    Coordinator, CrawlReport, CrawlSettings, PageError, PageFailure, PageOutcome,
};
pub use fetcher::{build_http_client, page_url, FetchError, HttpFetcher, PageSource};

use crate::config::Config;
use crate::extract::Extractor;
use crate::output::write_dataset;
use crate::CrawlError;
use std::future::Future;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and compile the layout
/// 2. Fetch and extract every configured page
/// 3. Write whatever records were gathered to the output file
///
/// Per-page failures never fail the crawl; only a failure to write the
/// output does.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `stop` - Resolves when the crawl should stop early
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished and the dataset was written
/// * `Err(CrawlError)` - Setup or persistence failed
pub async fn crawl<F>(config: &Config, stop: F) -> Result<CrawlReport, CrawlError>
where
    F: Future<Output = ()>,
{
    let fetcher = HttpFetcher::new(config)?;
    let extractor = Extractor::new(&config.layout)?;
    let coordinator = Coordinator::new(fetcher, extractor, CrawlSettings::from(&config.crawler));

    let report = coordinator
        .run_until(config.crawler.first_page..=config.crawler.last_page, stop)
        .await;

    tracing::info!("Writing data to file...");
    write_dataset(Path::new(&config.output.path), &report.records)?;
    tracing::info!(
        "Wrote {} records to {}",
        report.records.len(),
        config.output.path
    );

    Ok(report)
}
