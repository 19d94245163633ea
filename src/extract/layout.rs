//! Field extraction policy
//!
//! Maps each logical record field to a structural locator inside a row-group.
//! A layout change on the listing site is a change to this configuration, not
//! to the extraction code.

use serde::Deserialize;

/// Locates one scalar field inside a row-group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellRule {
    /// 1-based position among the row-group's direct `td` children
    pub column: usize,

    /// CSS selector for the first matching element inside the cell
    #[serde(default)]
    pub selector: Option<String>,

    /// Attribute to read; the trimmed text content is used when unset
    #[serde(default)]
    pub attribute: Option<String>,

    /// An absent attribute reads as an empty string instead of failing
    #[serde(default)]
    pub optional: bool,
}

impl CellRule {
    /// A rule reading the text content of a whole cell
    pub fn text(column: usize) -> Self {
        Self {
            column,
            selector: None,
            attribute: None,
            optional: false,
        }
    }

    /// A rule reading an attribute of an element inside a cell
    pub fn attribute(column: usize, selector: &str, attribute: &str) -> Self {
        Self {
            column,
            selector: Some(selector.to_string()),
            attribute: Some(attribute.to_string()),
            optional: false,
        }
    }

    /// Like `attribute`, but an element without the attribute reads as ""
    pub fn optional_attribute(column: usize, selector: &str, attribute: &str) -> Self {
        Self {
            optional: true,
            ..Self::attribute(column, selector, attribute)
        }
    }

    /// A rule reading the text content of an element inside a cell
    pub fn nested_text(column: usize, selector: &str) -> Self {
        Self {
            column,
            selector: Some(selector.to_string()),
            attribute: None,
            optional: false,
        }
    }
}

/// Locates the nationality flags of a row-group; every match is one nationality
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct NationalityRule {
    pub column: usize,
    pub selector: String,
    pub name_attribute: String,
    pub flag_attribute: String,

    /// A flag without `flag-attribute` gets an empty URL instead of failing
    #[serde(default)]
    pub flag_optional: bool,
}

/// Layout of the ranking listing
///
/// Every key is optional in TOML; unset keys keep the defaults for the
/// market-value ranking page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Selector for the element whose direct `tr` children are the row-groups
    pub table: String,

    /// Selector for the page-level gallery image
    pub gallery_selector: Option<String>,
    pub gallery_attribute: String,

    pub player: CellRule,
    pub player_image: CellRule,
    pub position: CellRule,
    pub age: CellRule,
    pub nationalities: NationalityRule,
    pub club: CellRule,
    pub club_image: CellRule,
    pub market_value: CellRule,
    pub matches: CellRule,
    pub goals: CellRule,
    pub own_goals: CellRule,
    pub assists: CellRule,
    pub yellow_cards: CellRule,
    pub second_yellow_cards: CellRule,
    pub red_cards: CellRule,
    pub substitution_on: CellRule,
    pub substitution_off: CellRule,
}

const PLAYER_IMAGE: &str = "tr:nth-of-type(1) > td:nth-child(1) > a > img";
const CLUB_IMAGE: &str = "a > img";

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            table: "#yw1 > table > tbody".to_string(),
            gallery_selector: Some(
                "#wertvollstespieler > div > div > div.responsive-table > div.galerie-box > div > img"
                    .to_string(),
            ),
            gallery_attribute: "src".to_string(),
            player: CellRule::attribute(1, PLAYER_IMAGE, "title"),
            player_image: CellRule::optional_attribute(1, PLAYER_IMAGE, "src"),
            position: CellRule::nested_text(1, "tr:nth-of-type(2) > td"),
            age: CellRule::text(2),
            nationalities: NationalityRule {
                column: 3,
                selector: "img".to_string(),
                name_attribute: "title".to_string(),
                flag_attribute: "src".to_string(),
                flag_optional: true,
            },
            club: CellRule::attribute(4, CLUB_IMAGE, "title"),
            club_image: CellRule::optional_attribute(4, CLUB_IMAGE, "src"),
            market_value: CellRule::text(5),
            matches: CellRule::text(6),
            goals: CellRule::text(7),
            own_goals: CellRule::text(8),
            assists: CellRule::text(9),
            yellow_cards: CellRule::text(10),
            second_yellow_cards: CellRule::text(11),
            red_cards: CellRule::text(12),
            substitution_on: CellRule::text(13),
            substitution_off: CellRule::text(14),
        }
    }
}

impl LayoutConfig {
    /// Returns every scalar cell rule with the name it is configured under
    pub fn cell_rules(&self) -> Vec<(&'static str, &CellRule)> {
        vec![
            ("player", &self.player),
            ("player-image", &self.player_image),
            ("position", &self.position),
            ("age", &self.age),
            ("club", &self.club),
            ("club-image", &self.club_image),
            ("market-value", &self.market_value),
            ("matches", &self.matches),
            ("goals", &self.goals),
            ("own-goals", &self.own_goals),
            ("assists", &self.assists),
            ("yellow-cards", &self.yellow_cards),
            ("second-yellow-cards", &self.second_yellow_cards),
            ("red-cards", &self.red_cards),
            ("substitution-on", &self.substitution_on),
            ("substitution-off", &self.substitution_off),
        ]
    }
}
