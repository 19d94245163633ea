//! Configuration module for mv-scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use mv_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mv-scout.toml")).unwrap();
//! println!("Crawling pages {}..={}", config.crawler.first_page, config.crawler.last_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, read_config};
pub use validation::validate;
