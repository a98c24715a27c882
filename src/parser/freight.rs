//! Freight rate table builder.
//!
//! Freight services print a per-pound rate for each weight bracket and a
//! minimum charge per zone. Every weight from 151 to 2000 is expanded from
//! its bracket's rate, floored at the zone minimum.

use std::collections::BTreeMap;

use super::candidate::select_table;
use super::header::HeaderStrategy;
use super::normalize::normalize_table;
use super::options::BracketPolicy;
use super::text::{extend_rate, fold_label, label_mentions, parse_price_line};
use crate::model::{
    Money, NormalizedRow, PageSource, PageSpan, RateTable, RawTable, WeightBracket,
    BRACKET_PHRASES, FREIGHT_WEIGHTS,
};

/// What a freight table row defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreightRow {
    Minimum,
    Bracket(WeightBracket),
}

fn classify(label: &str) -> Option<FreightRow> {
    if label_mentions(label, "minimum") {
        return Some(FreightRow::Minimum);
    }
    let folded = fold_label(label);
    BRACKET_PHRASES
        .iter()
        .find(|p| folded.contains(&fold_label(p.phrase)))
        .map(|p| FreightRow::Bracket(p.bracket))
}

/// Per-bracket rates and per-zone minimums collected over a span.
#[derive(Debug, Default)]
struct FreightGrid {
    brackets: BTreeMap<WeightBracket, BTreeMap<u8, Money>>,
    minimums: BTreeMap<u8, Money>,
}

impl FreightGrid {
    fn set_rate(&mut self, bracket: WeightBracket, zone: u8, rate: Money, policy: BracketPolicy) {
        let zones = self.brackets.entry(bracket).or_default();
        match policy {
            BracketPolicy::FirstWins => {
                if zones.contains_key(&zone) {
                    log::debug!("Ignoring repeated {} rate for zone {}", bracket, zone);
                } else {
                    zones.insert(zone, rate);
                }
            }
            BracketPolicy::LastWins => {
                zones.insert(zone, rate);
            }
        }
    }

    fn expand(&self) -> RateTable {
        let mut rates = RateTable::new();
        for weight in FREIGHT_WEIGHTS {
            let Some(zones) = WeightBracket::for_weight(weight).and_then(|b| self.brackets.get(&b))
            else {
                continue;
            };
            for (zone, rate) in zones {
                let Some(mut price) = extend_rate(weight, *rate) else {
                    log::debug!("Rate for {} lbs zone {} overflows, skipping", weight, zone);
                    continue;
                };
                if let Some(minimum) = self.minimums.get(zone) {
                    price = price.max(*minimum);
                }
                rates.insert(weight, *zone, price);
            }
        }
        rates
    }
}

/// Score a freight table candidate: recognized rows under a values-column
/// header. Tables without such a header are ineligible.
fn score_table(table: &RawTable, min_header_zones: usize) -> Option<usize> {
    let rows = normalize_table(table);
    let header = HeaderStrategy::Freight.find(&rows, min_header_zones)?;
    Some(
        rows[header.row + 1..]
            .iter()
            .filter(|row| classify(row.label()).is_some())
            .count(),
    )
}

/// Build the rate table of a freight service.
pub fn build_freight_rates<P: PageSource>(
    pages: &[P],
    span: PageSpan,
    policy: BracketPolicy,
    min_header_zones: usize,
) -> RateTable {
    let mut grid = FreightGrid::default();

    for page_idx in span.pages() {
        let Some(page) = pages.get(page_idx) else {
            break;
        };
        let tables = page.tables();

        let Some((table_idx, table)) =
            select_table(&tables, |t| score_table(t, min_header_zones))
        else {
            log::debug!("Page {}: no freight rate table", page_idx + 1);
            continue;
        };
        log::debug!("Page {}: using table {}", page_idx + 1, table_idx + 1);

        let rows = normalize_table(table);
        let Some(header) = HeaderStrategy::Freight.find(&rows, min_header_zones) else {
            continue;
        };

        for row in &rows[header.row + 1..] {
            read_row(row, &header.zones, &mut grid, policy);
        }
    }

    let rates = grid.expand();
    log::debug!(
        "Expanded {} freight brackets into {} weights",
        grid.brackets.len(),
        rates.weight_count()
    );
    rates
}

fn read_row(row: &NormalizedRow, zones: &[u8], grid: &mut FreightGrid, policy: BracketPolicy) {
    let Some(kind) = classify(row.label()) else {
        return;
    };

    let tokens = parse_price_line(row.values());
    if tokens.len() != zones.len() {
        log::debug!(
            "Row '{}' has {} prices for {} zones, skipping",
            row.label(),
            tokens.len(),
            zones.len()
        );
        return;
    }

    for (zone, token) in zones.iter().zip(tokens) {
        let Some(amount) = token.amount() else {
            continue;
        };
        match kind {
            FreightRow::Minimum => {
                grid.minimums.insert(*zone, amount);
            }
            FreightRow::Bracket(bracket) => grid.set_rate(bracket, *zone, amount, policy),
        }
    }
}
