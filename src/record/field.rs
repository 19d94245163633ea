//! Logical field names for player records
//!
//! Used by the layout rules to name what they extract, and by parse errors to
//! report which field failed.

use std::fmt;

/// A logical field of a `PlayerRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    // ===== Identity =====
    Player,
    PlayerImageUrl,
    Position,
    Age,
    Nationalities,

    // ===== Club & valuation =====
    Club,
    ClubImageUrl,
    MarketValue,

    // ===== Career statistics =====
    Matches,
    Goals,
    OwnGoals,
    Assists,
    YellowCards,
    SecondYellowCards,
    RedCards,
    SubstitutionOn,
    SubstitutionOff,
}

impl Field {
    /// Returns the snake_case key used for this field in the output dataset
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::PlayerImageUrl => "player_url",
            Self::Position => "position",
            Self::Age => "age",
            Self::Nationalities => "nationalities",
            Self::Club => "club",
            Self::ClubImageUrl => "club_image_url",
            Self::MarketValue => "market_value",
            Self::Matches => "matches",
            Self::Goals => "goals",
            Self::OwnGoals => "own_goals",
            Self::Assists => "assists",
            Self::YellowCards => "yellow_cards",
            Self::SecondYellowCards => "second_yellow_cards",
            Self::RedCards => "red_cards",
            Self::SubstitutionOn => "substitution_on",
            Self::SubstitutionOff => "substitution_off",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}
