//! Player record types
//!
//! This module defines the records produced by the extractor and persisted to
//! the output dataset:
//! - `PlayerRecord` - one ranked player on one listing page
//! - `NationalityRef` - one nationality flag attached to a player
//! - `Field` - logical field names used in diagnostics and layout rules

mod field;
mod player;

pub use field::Field;
pub use player::{NationalityRef, PlayerRecord};

#[cfg(test)]
pub(crate) use player::tests::sample_record;
