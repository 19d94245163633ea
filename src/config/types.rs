use crate::extract::LayoutConfig;
use serde::Deserialize;
use std::time::Duration;

/// Ranking listing URL; the page index is appended to it
pub const DEFAULT_BASE_URL: &str = "https://www.transfermarkt.com/spieler-statistik/wertvollstespieler/marktwertetop?land_id=0&ausrichtung=alle&spielerposition_id=alle&altersklasse=alle&jahrgang=0&kontinent_id=0&galerie=1&page=";

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Main configuration structure for mv-scout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Ranking URL template; `{page}` is replaced, or the index is appended
    pub base_url: String,

    /// First page index to crawl (1-based, inclusive)
    pub first_page: u32,

    /// Last page index to crawl (inclusive)
    pub last_page: u32,

    /// Maximum number of pages fetched at the same time
    pub max_concurrent_pages: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Extra attempts for transient fetch failures
    pub max_retries: u32,

    /// Delay between attempts (milliseconds)
    pub retry_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            first_page: 1,
            last_page: 500,
            max_concurrent_pages: 1,
            request_timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl CrawlerConfig {
    /// Total number of pages in the configured range
    pub fn page_count(&self) -> u32 {
        self.last_page.saturating_sub(self.first_page) + 1
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path to the JSON dataset file
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "player_data.json".to_string(),
        }
    }
}
