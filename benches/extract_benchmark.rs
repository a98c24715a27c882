//! Benchmarks for rate sheet reconstruction.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic extracted pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratesheet::{Page, RawTable, ZONE_CODES};

const ZONE_HEADER: &str = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";

/// Price cell with one amount per zone.
fn price_cell(base: u32) -> String {
    (1..=16)
        .map(|zone| format!("${}.{:02}", base + zone, zone))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Creates a synthetic rate document with the given number of flat services.
fn create_test_pages(service_count: usize) -> Vec<Page> {
    let mut pages = Vec::new();

    let mut postal = String::from("Postal Code Zone Index\n");
    for (i, code) in ZONE_CODES.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        postal.push_str(&format!("{}0A-{}9Z {}\n", letter, letter, code));
    }
    pages.push(Page::new(1).with_text(postal));

    let matrix_rows: Vec<Vec<String>> = ZONE_CODES
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let values: Vec<String> = (0..26).map(|j| ((i + j) % 16 + 1).to_string()).collect();
            vec![code.to_string(), values.join(" ")]
        })
        .collect();
    pages.push(
        Page::new(2)
            .with_text("Intra-Canada Zone Index")
            .with_table(RawTable::from_rows(matrix_rows)),
    );

    let names = [
        "FedEx First Overnight",
        "FedEx Priority Overnight",
        "FedEx Standard Overnight",
        "FedEx 2Day",
        "FedEx Economy",
    ];
    for name in names.iter().cycle().take(service_count) {
        for sheet in 0..4u32 {
            let mut rows = vec![vec!["Weight".to_string(), ZONE_HEADER.to_string()]];
            for weight in (sheet * 25 + 1)..=(sheet * 25 + 25).min(99) {
                rows.push(vec![format!("{} lbs", weight), price_cell(weight)]);
            }
            if sheet == 3 {
                rows.push(vec!["100 lbs".to_string(), price_cell(0)]);
            }
            let text = if sheet == 0 {
                format!("{} Rates\nZone", name)
            } else {
                format!("{} (continued)", name)
            };
            let number = pages.len() as u32 + 1;
            pages.push(Page::new(number).with_text(text).with_table(RawTable::from_rows(rows)));
        }
    }

    pages
}

/// Benchmark the full pipeline at various sizes.
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for service_count in [1, 3, 5].iter() {
        let pages = create_test_pages(*service_count);

        group.bench_function(format!("{}_services", service_count), |b| {
            b.iter(|| {
                let options = ratesheet::ExtractOptions::new().with_origin("M5V 1A1");
                let _ = ratesheet::extract_with_options(black_box(&pages), options);
            });
        });
    }

    group.finish();
}

/// Benchmark zone index parsing alone.
fn bench_zone_index(c: &mut Criterion) {
    let pages = create_test_pages(0);
    let text = pages[0].text.clone();

    c.bench_function("parse_postal_zone_map", |b| {
        b.iter(|| ratesheet::parser::parse_postal_zone_map(black_box(&text)));
    });

    c.bench_function("parse_zone_matrix", |b| {
        b.iter(|| ratesheet::parser::parse_zone_matrix(black_box(&pages[1].tables)));
    });
}

criterion_group!(benches, bench_extract, bench_zone_index);
criterion_main!(benches);
