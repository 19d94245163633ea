//! Market value normalization
//!
//! Turns listing strings such as `€50.00m`, `$1.2b` or `750k` into plain
//! integer currency units.

use regex::Regex;
use std::sync::OnceLock;

/// Fraction digits beyond this cannot affect the truncated result
const MAX_FRACTION_DIGITS: usize = 9;

fn money_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[€$£]?([0-9,.]+)([mbk]?)").expect("money pattern is a valid regex")
    })
}

/// Normalizes a currency-prefixed market value string
///
/// # Algorithm
///
/// 1. Strip the leading currency symbol (`€`, `$` or `£`)
/// 2. Remove `,` grouping separators
/// 3. Parse the remainder as a decimal with `.` as the decimal point
/// 4. Apply the magnitude suffix: `m` = 10^6, `b` = 10^9, `k` = 10^3 (case-insensitive)
/// 5. Truncate towards zero
///
/// The arithmetic is exact decimal, so `"€4.35m"` is `4350000` and never
/// `4349999`.
///
/// # Returns
///
/// * `Some(u64)` - The normalized value
/// * `None` - The text does not look like a market value (e.g. `"-"`)
///
/// # Example
///
/// ```
/// use mv_scout::extract::extract_money;
///
/// assert_eq!(extract_money("€50.00m"), Some(50_000_000));
/// assert_eq!(extract_money("-"), None);
/// ```
pub fn extract_money(text: &str) -> Option<u64> {
    let captures = money_pattern().captures(text.trim())?;
    let number = captures.get(1)?.as_str().replace(',', "");
    let multiplier = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(suffix) if suffix == "m" => 1_000_000u128,
        Some(suffix) if suffix == "b" => 1_000_000_000u128,
        Some(suffix) if suffix == "k" => 1_000u128,
        _ => 1u128,
    };

    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number.as_str(), ""),
    };

    // "1.2.3" or a bare "." is not a number
    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let fraction_value: u128 = if fraction.is_empty() {
        0
    } else {
        let digits: u128 = fraction.parse().ok()?;
        digits * multiplier / 10u128.pow(fraction.len() as u32)
    };

    let total = whole_value.checked_mul(multiplier)?.checked_add(fraction_value)?;
    u64::try_from(total).ok()
}
