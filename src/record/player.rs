use serde::{Deserialize, Serialize};

/// One nationality held by a player
///
/// Serialized as `{ "nationality_url": ..., "nationalty": ... }`; the downstream
/// viewer reads these exact keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalityRef {
    /// Flag image URL
    #[serde(rename = "nationality_url")]
    pub flag_image_url: String,

    /// Country name
    #[serde(rename = "nationalty")]
    pub name: String,
}

impl NationalityRef {
    pub fn new(name: impl Into<String>, flag_image_url: impl Into<String>) -> Self {
        Self {
            flag_image_url: flag_image_url.into(),
            name: name.into(),
        }
    }
}

/// One ranked player extracted from one listing page
///
/// Records are either fully populated or not produced at all. `market_value`
/// is the only field allowed to be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Page-level gallery image (empty when the page has none)
    #[serde(default)]
    pub gallery_url: String,

    /// Player portrait URL
    #[serde(rename = "player_url", default)]
    pub player_image_url: String,

    pub player: String,
    pub position: String,
    pub age: u32,

    /// Ordered as listed on the page, primary nationality first
    #[serde(default)]
    pub nationalities: Vec<NationalityRef>,

    #[serde(default)]
    pub club_image_url: String,
    pub club: String,

    /// Normalized market value in currency units, `None` if unparsable
    #[serde(default)]
    pub market_value: Option<u64>,

    pub matches: u32,
    pub goals: u32,
    pub own_goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub second_yellow_cards: u32,
    pub red_cards: u32,
    pub substitution_on: u32,
    pub substitution_off: u32,
}

impl PlayerRecord {
    /// Returns the primary (first listed) nationality, if any
    pub fn primary_nationality(&self) -> Option<&NationalityRef> {
        self.nationalities.first()
    }

    /// Returns true if the player's name matches `name`, ignoring case
    pub fn is_named(&self, name: &str) -> bool {
        self.player.to_lowercase() == name.trim().to_lowercase()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_record(name: &str) -> PlayerRecord {
        PlayerRecord {
            gallery_url: "https://img.example.com/gallery.jpg".to_string(),
            player_image_url: format!("https://img.example.com/{}.jpg", name.to_lowercase()),
            player: name.to_string(),
            position: "Centre-Forward".to_string(),
            age: 24,
            nationalities: vec![
                NationalityRef::new("Brazil", "https://img.example.com/flags/26.png"),
                NationalityRef::new("Portugal", "https://img.example.com/flags/136.png"),
            ],
            club_image_url: "https://img.example.com/clubs/418.png".to_string(),
            club: "Real Madrid".to_string(),
            market_value: Some(180_000_000),
            matches: 30,
            goals: 21,
            own_goals: 0,
            assists: 7,
            yellow_cards: 3,
            second_yellow_cards: 0,
            red_cards: 1,
            substitution_on: 2,
            substitution_off: 9,
        }
    }

    #[test]
    fn test_serialized_keys_match_dataset_format() {
        let record = sample_record("Vinicius");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["player"], "Vinicius");
        assert_eq!(value["player_url"], "https://img.example.com/vinicius.jpg");
        assert_eq!(value["market_value"], 180_000_000u64);
        assert_eq!(value["nationalities"][0]["nationalty"], "Brazil");
        assert_eq!(
            value["nationalities"][0]["nationality_url"],
            "https://img.example.com/flags/26.png"
        );
        assert!(value.get("player_image_url").is_none());
    }

    #[test]
    fn test_absent_market_value_serializes_as_null() {
        let mut record = sample_record("Pedri");
        record.market_value = None;

        let value = serde_json::to_value(&record).unwrap();
        assert!(value["market_value"].is_null());
    }

    #[test]
    fn test_key_order_follows_dataset_layout() {
        let json = serde_json::to_string(&sample_record("Rodri")).unwrap();

        let gallery = json.find("\"gallery_url\"").unwrap();
        let player = json.find("\"player\"").unwrap();
        let club = json.find("\"club\"").unwrap();
        let subs_off = json.find("\"substitution_off\"").unwrap();

        assert!(gallery < player);
        assert!(player < club);
        assert!(club < subs_off);
    }

    #[test]
    fn test_primary_nationality() {
        let record = sample_record("Raphinha");
        assert_eq!(record.primary_nationality().unwrap().name, "Brazil");

        let mut stateless = record.clone();
        stateless.nationalities.clear();
        assert!(stateless.primary_nationality().is_none());
    }

    #[test]
    fn test_is_named_ignores_case() {
        let record = sample_record("Jude Bellingham");
        assert!(record.is_named("jude bellingham"));
        assert!(record.is_named("  JUDE BELLINGHAM "));
        assert!(!record.is_named("Jobe Bellingham"));
    }
}
