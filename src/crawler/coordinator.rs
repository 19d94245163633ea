//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the fetch → extract cycle across a page range:
//! - Bounded concurrent fetching, with results consumed in page order
//! - Retrying transient fetch failures
//! - Isolating per-page failures (skip and continue)
//! - Accumulating records into a single ordered buffer
//! - Stopping early on request, dropping in-flight pages

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, PageSource};
use crate::extract::{Extractor, ParseError};
use crate::record::PlayerRecord;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use std::future::Future;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a page contributed no records
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result of crawling one page
#[derive(Debug)]
pub struct PageOutcome {
    pub page: u32,
    pub result: Result<Vec<PlayerRecord>, PageError>,
}

/// A page that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub message: String,
}

/// Summary of a finished (or stopped) crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,

    /// Pages in the requested range
    pub pages_total: u32,
    pub pages_succeeded: u32,
    pub failures: Vec<PageFailure>,

    /// True if the crawl was stopped before every page completed
    pub cancelled: bool,

    /// Records in page order, then row order
    pub records: Vec<PlayerRecord>,
}

impl CrawlReport {
    /// Returns the page indices that were skipped
    pub fn failed_pages(&self) -> Vec<u32> {
        self.failures.iter().map(|f| f.page).collect()
    }

    /// Returns the share of completed pages that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let completed = self.pages_succeeded as usize + self.failures.len();
        if completed == 0 {
            return 0.0;
        }
        (self.pages_succeeded as f64 / completed as f64) * 100.0
    }
}

/// Tunables for one crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Pages in flight at once; 1 is strictly sequential
    pub max_concurrent_pages: usize,

    /// Extra attempts for transient fetch failures
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 1,
            max_retries: 0,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&CrawlerConfig> for CrawlSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_concurrent_pages: config.max_concurrent_pages as usize,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<S> {
    source: S,
    extractor: Extractor,
    settings: CrawlSettings,
}

impl<S: PageSource> Coordinator<S> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `source` - Where page markup comes from
    /// * `extractor` - Compiled field extraction policy
    /// * `settings` - Concurrency and retry tunables
    pub fn new(source: S, extractor: Extractor, settings: CrawlSettings) -> Self {
        Self {
            source,
            extractor,
            settings,
        }
    }

    /// Crawls every page in `pages`
    pub async fn run(&self, pages: RangeInclusive<u32>) -> CrawlReport {
        self.run_until(pages, std::future::pending()).await
    }

    /// Crawls every page in `pages` until `stop` resolves
    ///
    /// Pages are fetched up to `max_concurrent_pages` at a time but consumed
    /// strictly in page order, so records from a later page always follow
    /// records from earlier pages. When `stop` resolves, pages still in flight
    /// are dropped and the records gathered so far are returned.
    pub async fn run_until<F>(&self, pages: RangeInclusive<u32>, stop: F) -> CrawlReport
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let first = *pages.start();
        let pages_total = if pages.is_empty() {
            0
        } else {
            pages.end() - first + 1
        };

        tracing::info!(
            "Starting crawl of pages {}..={} ({} pages, {} concurrent)",
            first,
            pages.end(),
            pages_total,
            self.settings.max_concurrent_pages
        );

        let mut records = Vec::new();
        let mut failures = Vec::new();
        let mut pages_succeeded = 0;
        let mut cancelled = false;

        let outcomes = stream::iter(pages)
            .map(|page| self.process_page(page, page - first + 1, pages_total))
            .buffered(self.settings.max_concurrent_pages.max(1));

        tokio::pin!(outcomes);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                biased;

                _ = &mut stop => {
                    tracing::warn!("Crawl stopped early; dropping pages still in flight");
                    cancelled = true;
                    break;
                }

                next = outcomes.next() => match next {
                    Some(outcome) => {
                        if accumulate(outcome, &mut records, &mut failures) {
                            pages_succeeded += 1;
                        }
                    }
                    None => break,
                },
            }
        }

        let report = CrawlReport {
            started_at,
            elapsed: start.elapsed(),
            pages_total,
            pages_succeeded,
            failures,
            cancelled,
            records,
        };

        tracing::info!(
            "Crawl finished: {} pages ok, {} failed, {} records in {:?}",
            report.pages_succeeded,
            report.failures.len(),
            report.records.len(),
            report.elapsed
        );

        report
    }

    /// Fetches and extracts a single page
    ///
    /// This is the unit of failure isolation: whatever happens here affects
    /// only this page's outcome.
    pub async fn process_page(&self, page: u32, position: u32, total: u32) -> PageOutcome {
        tracing::info!("Crawling page -> {}/{}", position, total);

        let result = match self.fetch_with_retry(page).await {
            Ok(body) => self
                .extractor
                .extract_page(page, &body)
                .map_err(PageError::from),
            Err(e) => Err(PageError::from(e)),
        };

        PageOutcome { page, result }
    }

    async fn fetch_with_retry(&self, page: u32) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.source.fetch_page(page).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.settings.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "{} (retry {}/{} in {:?})",
                        e,
                        attempt,
                        self.settings.max_retries,
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Appends a page's records to the accumulator, or records the failure
///
/// Returns true if the page succeeded.
fn accumulate(
    outcome: PageOutcome,
    records: &mut Vec<PlayerRecord>,
    failures: &mut Vec<PageFailure>,
) -> bool {
    match outcome.result {
        Ok(page_records) => {
            tracing::debug!(
                "Page {} yielded {} records",
                outcome.page,
                page_records.len()
            );
            records.extend(page_records);
            true
        }
        Err(e) => {
            tracing::warn!("Skipping page {}: {}", outcome.page, e);
            failures.push(PageFailure {
                page: outcome.page,
                message: e.to_string(),
            });
            false
        }
    }
}
