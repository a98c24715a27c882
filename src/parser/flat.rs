//! Flat-rate table builder.
//!
//! Flat services print one price per weight for weights up to 99 lbs, and a
//! "per 100 lbs" row with a per-pound rate for heavier shipments. The
//! heavier weights are synthesized from that rate.

use std::collections::BTreeMap;

use super::header::{HeaderStrategy, ZoneHeader};
use super::normalize::normalize_table;
use super::text::{extend_rate, fold_label, label_mentions, parse_price_line, parse_weight};
use crate::model::{
    Money, NormalizedRow, PageSource, PageSpan, RateTable, OVERAGE_WEIGHTS, PARSED_FLAT_WEIGHTS,
};

/// Label words of rows that describe the table instead of pricing a weight.
const DESCRIPTIVE_WORDS: [&str; 4] = ["weight", "zone", "envelope", "pak"];

/// Folded label marker of the per-pound overage row.
const PER_HUNDRED_MARKER: &str = "100lb";

/// Build the rate table of a flat-rate service.
pub fn build_flat_rates<P: PageSource>(
    pages: &[P],
    span: PageSpan,
    min_header_zones: usize,
) -> RateTable {
    let mut rates = RateTable::new();
    let mut per_pound: BTreeMap<u8, Money> = BTreeMap::new();

    for page_idx in span.pages() {
        let Some(page) = pages.get(page_idx) else {
            break;
        };

        for (table_idx, table) in page.tables().iter().enumerate() {
            let rows = normalize_table(table);
            let Some(header) = HeaderStrategy::Flat.find(&rows, min_header_zones) else {
                log::debug!(
                    "Page {}, table {}: no zone header, skipping",
                    page_idx + 1,
                    table_idx + 1
                );
                continue;
            };
            log::debug!(
                "Page {}, table {}: zone header {:?} on row {}",
                page_idx + 1,
                table_idx + 1,
                header.zones,
                header.row
            );

            for row in &rows[header.row + 1..] {
                read_row(row, &header, &mut rates, &mut per_pound);
            }
        }
    }

    if !per_pound.is_empty() {
        synthesize_overage(&mut rates, &per_pound);
    }

    rates
}

fn read_row(
    row: &NormalizedRow,
    header: &ZoneHeader,
    rates: &mut RateTable,
    per_pound: &mut BTreeMap<u8, Money>,
) {
    let label = row.label();
    if DESCRIPTIVE_WORDS.iter().any(|word| label_mentions(label, word)) {
        return;
    }

    let tokens = parse_price_line(row.values());

    if fold_label(label).contains(PER_HUNDRED_MARKER) {
        if tokens.len() != header.width() {
            log::debug!(
                "Per-pound row has {} prices for {} zones, skipping",
                tokens.len(),
                header.width()
            );
            return;
        }
        for (zone, token) in header.zones.iter().zip(tokens) {
            if let Some(rate) = token.amount() {
                per_pound.insert(*zone, rate);
            }
        }
        return;
    }

    let Some(weight) = parse_weight(label).filter(|w| PARSED_FLAT_WEIGHTS.contains(w)) else {
        return;
    };
    if tokens.iter().all(|token| token.amount().is_none()) {
        return;
    }

    for (zone, token) in header.zones.iter().zip(tokens) {
        if let Some(amount) = token.amount() {
            rates.insert(weight, *zone, amount);
        }
    }
}

/// Fill overage weights from per-pound rates without touching parsed cells.
fn synthesize_overage(rates: &mut RateTable, per_pound: &BTreeMap<u8, Money>) {
    let mut added = 0usize;
    for weight in OVERAGE_WEIGHTS {
        for (zone, rate) in per_pound {
            let Some(price) = extend_rate(weight, *rate) else {
                log::debug!("Overage for {} lbs zone {} overflows, skipping", weight, zone);
                continue;
            };
            if rates.insert_if_absent(weight, *zone, price) {
                added += 1;
            }
        }
    }
    log::debug!("Synthesized {} overage amounts", added);
}
