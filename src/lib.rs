//! mv-scout: a market-value ranking crawler
//!
//! This crate crawls a paginated football market-value ranking, extracts one
//! typed record per ranked player, and persists the records as a single JSON
//! dataset for a separate viewer.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for mv-scout operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] extract::ParseError),

    #[error("Persist error: {0}")]
    Persist(#[from] output::PersistError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid layout selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for mv-scout operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport, HttpFetcher, PageSource};
pub use extract::{extract_money, Extractor};
pub use record::{NationalityRef, PlayerRecord};
