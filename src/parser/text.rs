//! Token-level parsing of labels, zone headers and price cells.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_normalization::UnicodeNormalization;

use crate::model::{Money, MAX_ZONE, MIN_ZONE};

/// Fraction digits of every stored amount.
const MONEY_SCALE: u32 = 2;

/// Highest weight accepted from a bare leading integer.
const MAX_BARE_WEIGHT: u32 = 2000;

fn weight_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*lbs?\.?").unwrap())
}

/// Fold a label for fuzzy matching: NFKC, lowercase, no whitespace.
///
/// `"1000 to1999"` and `"1000 To 1999"` both fold to `"1000to1999"`.
pub fn fold_label(text: &str) -> String {
    text.nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Case-insensitive substring check on a label.
pub fn label_mentions(label: &str, word: &str) -> bool {
    label.to_lowercase().contains(word)
}

/// Zone numbers (1..=16) found among the whitespace tokens of `text`.
pub fn parse_zone_numbers(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .filter_map(|token| token.parse::<u8>().ok())
        .filter(|zone| (MIN_ZONE..=MAX_ZONE).contains(zone))
        .collect()
}

/// Integers among the whitespace tokens of `text`; other tokens are skipped.
pub fn parse_integers(text: &str) -> Vec<i64> {
    text.split_whitespace()
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}

/// Weight in pounds from a row label.
///
/// Accepts `"<N> lb"`, `"<N> lbs"`, `"<N>lbs."` or a bare leading integer
/// up to 2000. Range checks for a particular sheet are up to the caller.
pub fn parse_weight(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Some(caps) = weight_regex().captures(label) {
        return caps[1].parse().ok();
    }

    label
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .filter(|weight| (1..=MAX_BARE_WEIGHT).contains(weight))
}

/// One token of a price cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceToken {
    /// A parsed amount
    Amount(Money),
    /// A dash or blank: the cell has no price
    Absent,
}

impl PriceToken {
    /// The amount, if present.
    pub fn amount(self) -> Option<Money> {
        match self {
            PriceToken::Amount(amount) => Some(amount),
            PriceToken::Absent => None,
        }
    }
}

/// Clean a single price token.
///
/// Strips `$`, `,` and whitespace. Dashes and empty strings are
/// [`PriceToken::Absent`]; anything else that is not a number is `None`.
pub fn clean_amount(raw: &str) -> Option<PriceToken> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.as_str() {
        "" | "-" | "—" | "–" => Some(PriceToken::Absent),
        value => Decimal::from_str(value)
            .ok()
            .map(|amount| PriceToken::Amount(to_money_scale(amount))),
    }
}

/// Price tokens of a price cell, in column order.
///
/// Absent markers keep their column; non-numeric words are dropped.
pub fn parse_price_line(text: &str) -> Vec<PriceToken> {
    text.replace('$', " ")
        .split_whitespace()
        .filter_map(clean_amount)
        .collect()
}

/// Round half-up to two fraction digits.
pub fn round_half_up(amount: Decimal) -> Money {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// `weight × rate`, rounded half-up to cents.
///
/// `None` when the product does not fit a `Decimal`.
pub fn extend_rate(weight: u32, per_pound: Money) -> Option<Money> {
    Decimal::from(weight)
        .checked_mul(per_pound)
        .map(round_half_up)
}

/// Pad a parsed amount to two fraction digits without rounding.
fn to_money_scale(mut amount: Decimal) -> Money {
    if amount.scale() < MONEY_SCALE {
        amount.rescale(MONEY_SCALE);
    }
    amount
}
