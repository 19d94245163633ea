//! Record extractor for ranking listing pages
//!
//! Parses one page's markup into player records using a compiled
//! `LayoutConfig`. Each direct `tr` child of the row container is one
//! row-group, and each row-group becomes one record.

use crate::extract::layout::{CellRule, LayoutConfig};
use crate::extract::money::extract_money;
use crate::record::{Field, NationalityRef, PlayerRecord};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Structural or numeric failure while extracting a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("page {page}: ranking table not found")]
    MissingTable { page: u32 },

    #[error("page {page}, row {row}: no column {column} for field `{field}`")]
    MissingCell {
        page: u32,
        row: usize,
        field: Field,
        column: usize,
    },

    #[error("page {page}, row {row}: no element for field `{field}`")]
    MissingElement { page: u32, row: usize, field: Field },

    #[error("page {page}, row {row}: field `{field}` has no `{attribute}` attribute")]
    MissingAttribute {
        page: u32,
        row: usize,
        field: Field,
        attribute: String,
    },

    #[error("page {page}, row {row}: field `{field}` is not an integer: {value:?}")]
    InvalidInteger {
        page: u32,
        row: usize,
        field: Field,
        value: String,
    },
}

impl ParseError {
    /// Returns the page index the error occurred on
    pub fn page(&self) -> u32 {
        match self {
            Self::MissingTable { page }
            | Self::MissingCell { page, .. }
            | Self::MissingElement { page, .. }
            | Self::MissingAttribute { page, .. }
            | Self::InvalidInteger { page, .. } => *page,
        }
    }

    /// Returns the field that failed, if the failure is field-specific
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingTable { .. } => None,
            Self::MissingCell { field, .. }
            | Self::MissingElement { field, .. }
            | Self::MissingAttribute { field, .. }
            | Self::InvalidInteger { field, .. } => Some(*field),
        }
    }
}

/// Position of the row-group being extracted, for error reporting
struct RowContext<'a, 'b> {
    page: u32,
    row: usize,
    cells: &'b [ElementRef<'a>],
}

/// A `CellRule` with its selector compiled
#[derive(Debug)]
struct CompiledRule {
    field: Field,
    column: usize,
    selector: Option<Selector>,
    attribute: Option<String>,
    optional: bool,
}

impl CompiledRule {
    fn compile(field: Field, rule: &CellRule) -> Result<Self, ConfigError> {
        if rule.column == 0 {
            return Err(ConfigError::Validation(format!(
                "layout column for `{}` must be >= 1",
                field
            )));
        }

        let selector = rule
            .selector
            .as_deref()
            .map(|s| compile_selector(field.as_key(), s))
            .transpose()?;

        Ok(Self {
            field,
            column: rule.column,
            selector,
            attribute: rule.attribute.clone(),
            optional: rule.optional,
        })
    }

    fn cell<'a>(&self, ctx: &RowContext<'a, '_>) -> Result<ElementRef<'a>, ParseError> {
        ctx.cells
            .get(self.column - 1)
            .copied()
            .ok_or(ParseError::MissingCell {
                page: ctx.page,
                row: ctx.row,
                field: self.field,
                column: self.column,
            })
    }

    fn element<'a>(&self, ctx: &RowContext<'a, '_>) -> Result<ElementRef<'a>, ParseError> {
        let cell = self.cell(ctx)?;
        match &self.selector {
            Some(selector) => cell
                .select(selector)
                .next()
                .ok_or(ParseError::MissingElement {
                    page: ctx.page,
                    row: ctx.row,
                    field: self.field,
                }),
            None => Ok(cell),
        }
    }

    /// Reads the configured attribute, or the trimmed text content
    fn read(&self, ctx: &RowContext<'_, '_>) -> Result<String, ParseError> {
        let element = self.element(ctx)?;
        match &self.attribute {
            Some(attribute) => match read_attribute(element, attribute) {
                Some(value) => Ok(value),
                None if self.optional => Ok(String::new()),
                None => Err(ParseError::MissingAttribute {
                    page: ctx.page,
                    row: ctx.row,
                    field: self.field,
                    attribute: attribute.clone(),
                }),
            },
            None => Ok(element_text(element)),
        }
    }

    fn read_integer(&self, ctx: &RowContext<'_, '_>) -> Result<u32, ParseError> {
        let text = self.read(ctx)?;
        text.parse::<u32>()
            .map_err(|_| ParseError::InvalidInteger {
                page: ctx.page,
                row: ctx.row,
                field: self.field,
                value: text,
            })
    }
}

#[derive(Debug)]
struct CompiledNationalityRule {
    column: usize,
    selector: Selector,
    name_attribute: String,
    flag_attribute: String,
    flag_optional: bool,
}

/// Extracts player records from ranking listing pages
///
/// Selectors are compiled once in `Extractor::new` and reused for every page.
#[derive(Debug)]
pub struct Extractor {
    table: Selector,
    gallery: Option<(Selector, String)>,
    player: CompiledRule,
    player_image: CompiledRule,
    position: CompiledRule,
    age: CompiledRule,
    nationalities: CompiledNationalityRule,
    club: CompiledRule,
    club_image: CompiledRule,
    market_value: CompiledRule,
    statistics: [CompiledRule; 9],
}

impl Extractor {
    /// Compiles a layout into an extractor
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is invalid or a column is zero
    pub fn new(layout: &LayoutConfig) -> Result<Self, ConfigError> {
        let table = compile_selector("table", &layout.table)?;
        let gallery = layout
            .gallery_selector
            .as_deref()
            .map(|s| compile_selector("gallery-selector", s))
            .transpose()?
            .map(|selector| (selector, layout.gallery_attribute.clone()));

        if layout.nationalities.column == 0 {
            return Err(ConfigError::Validation(
                "layout column for `nationalities` must be >= 1".to_string(),
            ));
        }
        let nationalities = CompiledNationalityRule {
            column: layout.nationalities.column,
            selector: compile_selector("nationalities", &layout.nationalities.selector)?,
            name_attribute: layout.nationalities.name_attribute.clone(),
            flag_attribute: layout.nationalities.flag_attribute.clone(),
            flag_optional: layout.nationalities.flag_optional,
        };

        Ok(Self {
            table,
            gallery,
            player: CompiledRule::compile(Field::Player, &layout.player)?,
            player_image: CompiledRule::compile(Field::PlayerImageUrl, &layout.player_image)?,
            position: CompiledRule::compile(Field::Position, &layout.position)?,
            age: CompiledRule::compile(Field::Age, &layout.age)?,
            nationalities,
            club: CompiledRule::compile(Field::Club, &layout.club)?,
            club_image: CompiledRule::compile(Field::ClubImageUrl, &layout.club_image)?,
            market_value: CompiledRule::compile(Field::MarketValue, &layout.market_value)?,
            statistics: [
                CompiledRule::compile(Field::Matches, &layout.matches)?,
                CompiledRule::compile(Field::Goals, &layout.goals)?,
                CompiledRule::compile(Field::OwnGoals, &layout.own_goals)?,
                CompiledRule::compile(Field::Assists, &layout.assists)?,
                CompiledRule::compile(Field::YellowCards, &layout.yellow_cards)?,
                CompiledRule::compile(Field::SecondYellowCards, &layout.second_yellow_cards)?,
                CompiledRule::compile(Field::RedCards, &layout.red_cards)?,
                CompiledRule::compile(Field::SubstitutionOn, &layout.substitution_on)?,
                CompiledRule::compile(Field::SubstitutionOff, &layout.substitution_off)?,
            ],
        })
    }

    /// Extracts every row-group on a page
    ///
    /// The number of records is derived from the markup. A single failing
    /// record fails the whole page so that no partial page is ever kept.
    ///
    /// # Arguments
    ///
    /// * `page` - The page index, used in error reports
    /// * `html` - The raw page markup
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PlayerRecord>)` - Records in markup order (possibly empty)
    /// * `Err(ParseError)` - The table is missing or a record failed
    pub fn extract_page(&self, page: u32, html: &str) -> Result<Vec<PlayerRecord>, ParseError> {
        let document = Html::parse_document(html);

        let table = document
            .select(&self.table)
            .next()
            .ok_or(ParseError::MissingTable { page })?;

        let gallery_url = self.gallery_url(&document);

        table
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name() == "tr")
            .enumerate()
            .map(|(index, row)| self.extract_row(page, index + 1, row, &gallery_url))
            .collect()
    }

    fn gallery_url(&self, document: &Html) -> String {
        self.gallery
            .as_ref()
            .and_then(|(selector, attribute)| {
                document
                    .select(selector)
                    .next()
                    .and_then(|element| read_attribute(element, attribute))
            })
            .unwrap_or_default()
    }

    fn extract_row(
        &self,
        page: u32,
        row: usize,
        element: ElementRef<'_>,
        gallery_url: &str,
    ) -> Result<PlayerRecord, ParseError> {
        let cells: Vec<ElementRef<'_>> = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "td")
            .collect();
        let ctx = RowContext {
            page,
            row,
            cells: &cells,
        };

        let [
            matches,
            goals,
            own_goals,
            assists,
            yellow_cards,
            second_yellow_cards,
            red_cards,
            substitution_on,
            substitution_off,
        ] = &self.statistics;

        Ok(PlayerRecord {
            gallery_url: gallery_url.to_string(),
            player_image_url: self.player_image.read(&ctx)?,
            player: self.player.read(&ctx)?,
            position: self.position.read(&ctx)?,
            age: self.age.read_integer(&ctx)?,
            nationalities: self.extract_nationalities(&ctx)?,
            club_image_url: self.club_image.read(&ctx)?,
            club: self.club.read(&ctx)?,
            market_value: extract_money(&self.market_value.read(&ctx)?),
            matches: matches.read_integer(&ctx)?,
            goals: goals.read_integer(&ctx)?,
            own_goals: own_goals.read_integer(&ctx)?,
            assists: assists.read_integer(&ctx)?,
            yellow_cards: yellow_cards.read_integer(&ctx)?,
            second_yellow_cards: second_yellow_cards.read_integer(&ctx)?,
            red_cards: red_cards.read_integer(&ctx)?,
            substitution_on: substitution_on.read_integer(&ctx)?,
            substitution_off: substitution_off.read_integer(&ctx)?,
        })
    }

    fn extract_nationalities(
        &self,
        ctx: &RowContext<'_, '_>,
    ) -> Result<Vec<NationalityRef>, ParseError> {
        let rule = &self.nationalities;
        let cell = ctx
            .cells
            .get(rule.column - 1)
            .ok_or(ParseError::MissingCell {
                page: ctx.page,
                row: ctx.row,
                field: Field::Nationalities,
                column: rule.column,
            })?;

        let attribute = |element: ElementRef<'_>, name: &str| {
            read_attribute(element, name).ok_or_else(|| ParseError::MissingAttribute {
                page: ctx.page,
                row: ctx.row,
                field: Field::Nationalities,
                attribute: name.to_string(),
            })
        };

        cell.select(&rule.selector)
            .map(|flag| -> Result<NationalityRef, ParseError> {
                let flag_image_url = match attribute(flag, &rule.flag_attribute) {
                    Err(ParseError::MissingAttribute { .. }) if rule.flag_optional => String::new(),
                    other => other?,
                };
                Ok(NationalityRef {
                    flag_image_url,
                    name: attribute(flag, &rule.name_attribute)?,
                })
            })
            .collect()
    }
}

fn compile_selector(name: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} ({:?}): {}", name, selector, e)))
}

fn read_attribute(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(|value| value.trim().to_string())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
