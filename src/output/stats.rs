//! Statistics generation from a player dataset
//!
//! This module provides functionality for summarising a persisted dataset
//! and printing the summary for the `--stats` mode.

use crate::record::PlayerRecord;
use std::collections::{HashMap, HashSet};

/// Dataset statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatistics {
    /// Total number of player records
    pub total_players: u64,

    /// Records carrying a parsed market value
    pub with_market_value: u64,

    /// Sum of all parsed market values
    pub total_market_value: u128,

    /// Most valuable player and their value
    pub top_player: Option<(String, u64)>,

    /// Number of distinct clubs
    pub unique_clubs: u64,

    /// Number of distinct nationalities (any position in the list)
    pub unique_nationalities: u64,

    /// Clubs with the most ranked players, descending
    pub top_clubs: Vec<(String, u64)>,
}

impl DatasetStatistics {
    /// Records whose market value could not be parsed
    pub fn missing_market_value(&self) -> u64 {
        self.total_players - self.with_market_value
    }

    /// Mean market value over records that have one
    pub fn average_market_value(&self) -> Option<u64> {
        if self.with_market_value == 0 {
            return None;
        }
        u64::try_from(self.total_market_value / u128::from(self.with_market_value)).ok()
    }
}

/// Number of clubs listed in `top_clubs`
const TOP_CLUBS: usize = 5;

/// Computes statistics over a set of records
pub fn dataset_statistics(records: &[PlayerRecord]) -> DatasetStatistics {
    let mut with_market_value = 0u64;
    let mut total_market_value = 0u128;
    let mut top_player: Option<(String, u64)> = None;
    let mut clubs: HashMap<&str, u64> = HashMap::new();
    let mut nationalities: HashSet<&str> = HashSet::new();

    for record in records {
        if let Some(value) = record.market_value {
            with_market_value += 1;
            total_market_value += u128::from(value);

            // Ties keep the higher ranked player
            if top_player.as_ref().map_or(true, |(_, best)| value > *best) {
                top_player = Some((record.player.clone(), value));
            }
        }

        *clubs.entry(record.club.as_str()).or_insert(0) += 1;
        for nationality in &record.nationalities {
            nationalities.insert(nationality.name.as_str());
        }
    }

    let unique_clubs = clubs.len() as u64;

    let mut top_clubs: Vec<(String, u64)> = clubs
        .into_iter()
        .map(|(club, count)| (club.to_string(), count))
        .collect();
    top_clubs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_clubs.truncate(TOP_CLUBS);

    DatasetStatistics {
        total_players: records.len() as u64,
        with_market_value,
        total_market_value,
        top_player,
        unique_clubs,
        unique_nationalities: nationalities.len() as u64,
        top_clubs,
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &DatasetStatistics) {
    println!("=== Dataset Statistics ===\n");

    println!("Overview:");
    println!("  Total players: {}", stats.total_players);
    println!("  Unique clubs: {}", stats.unique_clubs);
    println!("  Unique nationalities: {}", stats.unique_nationalities);
    println!();

    println!("Market Values:");
    let coverage = if stats.total_players > 0 {
        (stats.with_market_value as f64 / stats.total_players as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  With value: {} ({:.1}%)",
        stats.with_market_value, coverage
    );
    println!("  Missing value: {}", stats.missing_market_value());
    println!("  Total: {}", stats.total_market_value);
    if let Some(average) = stats.average_market_value() {
        println!("  Average: {}", average);
    }
    if let Some((player, value)) = &stats.top_player {
        println!("  Most valuable: {} ({})", player, value);
    }
    println!();

    if !stats.top_clubs.is_empty() {
        println!("Top Clubs ({}):", stats.top_clubs.len());
        for (club, count) in &stats.top_clubs {
            println!("  - {}: {}", club, count);
        }
    }
}
