//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the browser-like user agent
//! - Resolving a page index to a listing URL
//! - GET requests returning the raw page markup
//! - Error classification (transient vs. permanent)
//!
//! The fetcher never retries; retry policy belongs to the coordinator.

use crate::config::{Config, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Transport or HTTP failure while fetching one page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL for page {page}: {source}")]
    InvalidUrl { page: u32, source: url::ParseError },

    #[error("Request timeout for page {page}")]
    Timeout { page: u32 },

    #[error("Connection failed for page {page}: {source}")]
    Connect { page: u32, source: reqwest::Error },

    #[error("HTTP {status} for page {page}")]
    Status { page: u32, status: u16 },

    #[error("HTTP error for page {page}: {source}")]
    Http { page: u32, source: reqwest::Error },
}

impl FetchError {
    /// Returns the page index the error occurred on
    pub fn page(&self) -> u32 {
        match self {
            Self::InvalidUrl { page, .. }
            | Self::Timeout { page }
            | Self::Connect { page, .. }
            | Self::Status { page, .. }
            | Self::Http { page, .. } => *page,
        }
    }

    /// Returns true if another attempt may succeed
    ///
    /// | Condition | Transient |
    /// |-----------|-----------|
    /// | Timeout | yes |
    /// | Connection failure | yes |
    /// | HTTP 429 | yes |
    /// | HTTP 5xx | yes |
    /// | Other HTTP status | no |
    /// | Invalid URL, body decoding | no |
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connect { .. } => true,
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            Self::InvalidUrl { .. } | Self::Http { .. } => false,
        }
    }

    fn from_reqwest(page: u32, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { page }
        } else if error.is_connect() {
            Self::Connect {
                page,
                source: error,
            }
        } else {
            Self::Http {
                page,
                source: error,
            }
        }
    }
}

/// A source of raw listing markup, addressed by page index
///
/// `HttpFetcher` is the production implementation; tests substitute
/// in-memory sources.
pub trait PageSource {
    /// Fetches the markup of one page
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Resolves a page index against the listing URL template
///
/// A `{page}` placeholder is replaced with the index; without one the index
/// is appended to the template.
///
/// # Example
///
/// ```
/// use mv_scout::crawler::page_url;
///
/// let url = page_url("https://example.com/top?page=", 3).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/top?page=3");
///
/// let url = page_url("https://example.com/top/page/{page}", 4).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/top/page/4");
/// ```
pub fn page_url(base_url: &str, page: u32) -> Result<Url, url::ParseError> {
    let raw = if base_url.contains("{page}") {
        base_url.replace("{page}", &page.to_string())
    } else {
        format!("{}{}", base_url, page)
    };
    Url::parse(&raw)
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler and user agent configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        Ok(Self::with_client(client, &config.crawler.base_url))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Returns the URL requested for a page
    pub fn url_for(&self, page: u32) -> Result<Url, FetchError> {
        page_url(&self.base_url, page).map_err(|source| FetchError::InvalidUrl { page, source })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        let url = self.url_for(page)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(page, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(page, e))
    }
}
