//! Record extraction from ranking listing markup
//!
//! This module turns one page of raw HTML into typed player records:
//! - Field extraction policy (which cell and attribute feeds which field)
//! - Structural parsing of the row-groups on a page
//! - Market value normalization

mod layout;
mod money;
mod parser;

pub use layout::{CellRule, LayoutConfig, NationalityRule};
pub use money::extract_money;
pub use parser::{Extractor, ParseError};

#[cfg(test)]
pub(crate) use parser::tests::{page_html, RowFixture};
