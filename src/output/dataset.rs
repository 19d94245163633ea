//! In-memory view over a persisted dataset

use crate::output::{read_dataset, PersistResult};
use crate::record::PlayerRecord;
use std::path::Path;

/// A loaded player dataset
///
/// Records keep the order they had in the file, which is the ranking order
/// the crawl produced.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self { records }
    }

    /// Loads a dataset from a JSON file
    pub fn load(path: &Path) -> PersistResult<Self> {
        Ok(Self::new(read_dataset(path)?))
    }

    /// Finds a player by name, ignoring case
    ///
    /// Names are not unique across the ranking; the highest ranked match is
    /// returned.
    pub fn find_player(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.iter().find(|record| record.is_named(name))
    }

    /// Returns every player name in dataset order
    pub fn player_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.player.as_str()).collect()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
