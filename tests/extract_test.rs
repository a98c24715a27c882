//! End-to-end extraction tests over synthetic extracted pages.

use ratesheet::model::FLAT_WEIGHTS;
use ratesheet::parser::locate_services;
use ratesheet::{
    extract, extract_with_options, BracketPolicy, Error, ExtractOptions, Page, PageSpan, RawTable,
    ZoneCode, NO_ROUTE_ZONE, SERVICE_CATALOG, ZONE_CODES,
};
use rust_decimal_macros::dec;

const FULL_HEADER: &str = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";

fn matrix_line(first: u8, second: u8) -> String {
    let mut values = vec![first.to_string(), second.to_string()];
    values.extend((2..26).map(|i| (i % 16 + 1).to_string()));
    values.join(" ")
}

fn zone_index_pages() -> Vec<Page> {
    let matrix = RawTable {
        rows: vec![
            vec![Some("Origin".to_string()), Some("Destination".to_string())],
            vec![None, Some(ZONE_CODES.join(" "))],
            vec![
                Some("DA\nDB".to_string()),
                Some(format!("{}\n{}", matrix_line(0, 5), matrix_line(5, 0))),
            ],
        ],
    };

    vec![
        Page::new(1).with_text("Postal Code Zone Index\nPostal Code Zone\nM5V-M5V DA\nM5W-M5Z DB"),
        Page::new(2)
            .with_text("Intra-Canada Zone Index\nOrigin Destination")
            .with_table(matrix),
    ]
}

/// The three-page document: postal index, matrix, one flat service.
fn scenario_pages() -> Vec<Page> {
    let mut pages = zone_index_pages();
    pages.push(
        Page::new(3)
            .with_text("FedEx Economy Rates\nCanada")
            .with_table(RawTable::from_rows([
                ["Weight", "1 2"],
                ["1", "10.00 20.00"],
                ["100 lbs", "1.00 2.00"],
            ])),
    );
    pages
}

#[test]
fn test_end_to_end_scenario() {
    let options = ExtractOptions::new()
        .with_origin("M5V1A1")
        .with_min_header_zones(2);
    let sheet = extract_with_options(&scenario_pages(), options).unwrap();

    assert_eq!(sheet.origin_zone, ZoneCode::parse("DA"));
    assert_eq!(sheet.postal_zones.len(), 2);

    let zones = sheet.zones.as_ref().unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].start_postal_code, "M5V");
    assert_eq!(zones[0].zone, 0);
    assert_eq!(zones[1].start_postal_code, "M5W");
    assert_eq!(zones[1].end_postal_code, "M5Z");
    assert_eq!(zones[1].zone, 5);
    assert_eq!(zones[1].country_name, "Canada");

    let economy = sheet.service("FedEx Economy").unwrap();
    assert!(!economy.is_freight);
    assert_eq!(economy.pages, PageSpan::new(2, 2));
    assert_eq!(economy.rates.get(1, 1), Some(dec!(10.00)));
    assert_eq!(economy.rates.get(1, 2), Some(dec!(20.00)));
    assert_eq!(economy.rates.get(120, 1), Some(dec!(120.00)));
    assert_eq!(economy.rates.get(120, 2), Some(dec!(240.00)));
    assert!(economy.rates.zones(100).is_none());
    assert!(economy.rates.weights().all(|w| FLAT_WEIGHTS.contains(&w)));
}

#[test]
fn test_default_header_threshold_ignores_narrow_tables() {
    // "1 2" is too narrow for the default seven-zone header
    let sheet = extract_with_options(
        &scenario_pages(),
        ExtractOptions::new().with_origin("M5V1A1"),
    )
    .unwrap();
    assert!(sheet.service("FedEx Economy").unwrap().rates.is_empty());
}

#[test]
fn test_missing_matrix_entry_falls_back_to_zone_16() {
    let mut pages = scenario_pages();
    // DC has no row in the matrix
    pages[0] = Page::new(1).with_text("Postal Code Zone Index\nM5V-M5V DC\nX0A-X0C DZ");

    let sheet = extract_with_options(&pages, ExtractOptions::new().with_origin("M5V")).unwrap();
    assert_eq!(sheet.origin_zone, ZoneCode::parse("DC"));

    let zones = sheet.zones.unwrap();
    assert_eq!(zones[1].start_postal_code, "X0A");
    assert!(zones.iter().all(|row| row.zone == NO_ROUTE_ZONE));
}

#[test]
fn test_freight_tier_and_minimum() {
    let mut pages = zone_index_pages();
    pages.push(
        Page::new(3)
            .with_text("FedEx 1Day Freight Rates\nZone")
            .with_table(RawTable::from_rows([
                ["Zone", "1 2 3 4 5 6 7"],
                ["Minimum charge", "100.00 110.00 120.00 130.00 150.00 160.00 170.00"],
                ["1000 to 1999 lbs", "0.50 0.40 0.30 0.20 0.10 0.10 0.10"],
            ])),
    );
    pages.push(Page::new(4).with_text("FedEx 1Day Freight Rates (continued)"));

    let sheet = extract(&pages).unwrap();
    let freight = sheet.service("FedEx 1Day Freight").unwrap();

    assert!(freight.is_freight);
    assert_eq!(freight.pages, PageSpan::new(2, 3));
    assert_eq!(freight.rates.get(1200, 5), Some(dec!(150.00)));
    assert_eq!(freight.rates.get(1999, 5), Some(dec!(199.90)));
    assert_eq!(freight.rates.get(1000, 1), Some(dec!(500.00)));
    assert!(freight.rates.zones(999).is_none());
    assert!(freight.rates.zones(2000).is_none());
}

#[test]
fn test_freight_duplicate_bracket_policy() {
    let ones = "1.00 ".repeat(16);
    let twos = "2.00 ".repeat(16);
    let mut pages = zone_index_pages();
    pages.push(
        Page::new(3)
            .with_text("FedEx 1Day Freight Rates")
            .with_table(RawTable::from_rows([
                ["Zone", FULL_HEADER],
                ["151 to 299", ones.as_str()],
                ["151 to 299", twos.as_str()],
            ])),
    );

    let first = extract(&pages).unwrap();
    let last = extract_with_options(
        &pages,
        ExtractOptions::new().with_bracket_policy(BracketPolicy::LastWins),
    )
    .unwrap();

    let rate = |sheet: &ratesheet::RateSheet| sheet.services[0].rates.get(200, 16);
    assert_eq!(rate(&first), Some(dec!(200.00)));
    assert_eq!(rate(&last), Some(dec!(400.00)));
}

#[test]
fn test_service_locator_claims_in_catalog_order() {
    let mut pages = zone_index_pages();
    for text in [
        "FedEx Priority Overnight Rates",
        "FedEx Priority Overnight Rates",
        "FedEx Economy Rates",
        "FedEx Priority Overnight Rates",
        "FedEx Priority Overnight Rates",
        "FedEx 2Day Rates",
    ] {
        let number = pages.len() as u32 + 1;
        pages.push(Page::new(number).with_text(text));
    }

    let located = locate_services(SERVICE_CATALOG, &pages);
    let spans: Vec<_> = located
        .iter()
        .map(|l| (l.descriptor.name, l.span.start, l.span.end))
        .collect();

    // Priority claims pages 2..=5. Economy's only title page falls inside
    // that claim, so it is left out.
    assert_eq!(spans[0], ("FedEx Priority Overnight", 2, 5));
    assert_eq!(spans[1], ("FedEx 2Day", 7, 7));
    assert_eq!(spans.len(), 2);

    let again = locate_services(SERVICE_CATALOG, &pages);
    assert_eq!(located, again);
}

#[test]
fn test_strict_mode_failures() {
    let report = vec![Page::new(1).with_text("Quarterly results")];
    assert!(matches!(extract(&report), Err(Error::UnrecognizedDocument(_))));

    let mut pages = scenario_pages();
    pages.remove(1);
    let result = extract_with_options(&pages, ExtractOptions::new().with_origin("M5V"));
    assert!(matches!(result, Err(Error::MissingZoneMatrix)));

    // Without an origin the matrix is not needed
    assert!(extract(&pages).is_ok());
}

#[test]
fn test_unknown_origin_keeps_rates() {
    let options = ExtractOptions::new()
        .with_origin("Z9")
        .with_min_header_zones(2);
    let sheet = extract_with_options(&scenario_pages(), options).unwrap();

    assert!(sheet.origin_zone.is_none());
    assert!(sheet.zones.is_none());
    assert_eq!(sheet.rate_count(), 2 + 50 * 2);
}
