//! Output module for persisting and reading the player dataset
//!
//! This module handles:
//! - Writing the final record collection as a JSON file (atomically)
//! - Reading a dataset back for lookups and statistics
//! - Summarising a dataset for the `--stats` mode

mod dataset;
mod json;
pub mod stats;

pub use dataset::Dataset;
pub use json::{read_dataset, to_json, write_dataset};
pub use stats::{dataset_statistics, print_statistics, DatasetStatistics};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or reading the dataset
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse dataset {}: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type for output operations
pub type PersistResult<T> = Result<T, PersistError>;
