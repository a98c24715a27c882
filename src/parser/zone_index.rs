//! Zone index parsing: postal ranges to zone codes, and the zone matrix.

use std::sync::OnceLock;

use regex::Regex;

use super::candidate::select_table;
use super::options::ZoneIndexMarkers;
use super::text::parse_integers;
use crate::model::{
    PageSource, PostalRange, PostalZoneMap, RawTable, ZoneCode, ZoneMatrix, ZONE_CODES,
};

/// Legend printed above the destination columns of the matrix.
const DESTINATION_LEGEND: &str = "DA DB DC";

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Z]\d[A-Z])\s*[—–-]\s*([A-Z]\d[A-Z])\s+(D[A-Z])").unwrap()
    })
}

/// Pages holding the two zone index sections, 0-indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneIndexPages {
    /// Page with the postal-code-to-zone index
    pub postal_index: Option<usize>,
    /// Page with the zone-to-zone distance matrix
    pub zone_matrix: Option<usize>,
}

/// Parsed zone index of a document.
#[derive(Debug, Clone, Default)]
pub struct ZoneIndex {
    /// Where the sections were found
    pub pages: ZoneIndexPages,
    /// Postal ranges to zone codes
    pub postal_zones: PostalZoneMap,
    /// Zone code distances
    pub matrix: ZoneMatrix,
}

/// Locate and parse both zone index sections.
///
/// Missing sections leave the corresponding mapping empty.
pub fn build_zone_index<P: PageSource>(pages: &[P], markers: &ZoneIndexMarkers) -> ZoneIndex {
    let found = find_zone_index_pages(pages, markers);

    match found.postal_index {
        Some(idx) => log::info!("Found postal code zone index on page {}", idx + 1),
        None => log::warn!("Could not find postal code zone index page"),
    }
    match found.zone_matrix {
        Some(idx) => log::info!("Found zone matrix on page {}", idx + 1),
        None => log::warn!("Could not find zone matrix page"),
    }

    let postal_zones = found
        .postal_index
        .and_then(|idx| pages.get(idx))
        .map(|page| parse_postal_zone_map(&page.text()))
        .unwrap_or_default();

    let matrix = found
        .zone_matrix
        .and_then(|idx| pages.get(idx))
        .map(|page| parse_zone_matrix(&page.tables()))
        .unwrap_or_default();

    log::info!(
        "Parsed {} postal code ranges, {} zone matrix entries",
        postal_zones.len(),
        matrix.len()
    );

    ZoneIndex {
        pages: found,
        postal_zones,
        matrix,
    }
}

/// Find the first page containing each marker phrase.
pub fn find_zone_index_pages<P: PageSource>(
    pages: &[P],
    markers: &ZoneIndexMarkers,
) -> ZoneIndexPages {
    let mut found = ZoneIndexPages::default();

    for (idx, page) in pages.iter().enumerate() {
        let text = page.text();
        if found.postal_index.is_none() && text.contains(markers.postal_index.as_str()) {
            found.postal_index = Some(idx);
        }
        if found.zone_matrix.is_none() && text.contains(markers.zone_matrix.as_str()) {
            found.zone_matrix = Some(idx);
        }
        if found.postal_index.is_some() && found.zone_matrix.is_some() {
            break;
        }
    }

    found
}

/// Parse the postal index page text into ranges.
///
/// Explicit `A1A-A9Z DA` ranges are read first. Then bare `A1A DA` pairs
/// are added as single-prefix ranges, unless a wider range already starts
/// at that prefix.
pub fn parse_postal_zone_map(text: &str) -> PostalZoneMap {
    let mut map = PostalZoneMap::new();

    for caps in range_regex().captures_iter(text) {
        if let Some(zone) = ZoneCode::parse(&caps[3]) {
            map.insert(PostalRange::new(&caps[1], &caps[2]), zone);
        }
    }

    for line in text.lines() {
        if line.contains("Postal Code") && line.contains("Zone") {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            let zone = tokens.get(i + 1).and_then(|next| ZoneCode::parse(next));

            if let (true, Some(zone)) = (is_postal_prefix(token), zone) {
                // Tail of a spaced-out range, already read above
                if i > 0 && is_dash(tokens[i - 1]) {
                    i += 2;
                    continue;
                }
                if map.has_wider_range_starting_at(token) {
                    log::debug!("Skipping single prefix {}: covered by a wider range", token);
                } else {
                    map.insert(PostalRange::single(token), zone);
                }
            }
            i += 1;
        }
    }

    map
}

/// Parse the zone matrix from the tables of the matrix page.
pub fn parse_zone_matrix(tables: &[RawTable]) -> ZoneMatrix {
    let mut matrix = ZoneMatrix::new();

    let best = select_table(tables, |t| Some((matrix_lines(t).len(), t.row_count())));
    let Some((idx, table)) = best else {
        log::warn!("Zone matrix page has no tables");
        return matrix;
    };
    log::debug!("Using table {} of {} as the zone matrix", idx + 1, tables.len());

    for (origin, distances) in matrix_lines(table) {
        for (destination, distance) in ZoneCode::all().zip(distances) {
            matrix.insert(origin, destination, distance);
        }
    }

    matrix
}

/// Origin lines of a matrix table that carry one distance per zone code.
fn matrix_lines(table: &RawTable) -> Vec<(ZoneCode, Vec<u8>)> {
    let mut lines = Vec::new();

    for row in &table.rows {
        if row.len() < 2 {
            continue;
        }
        let first = row[0].as_deref().unwrap_or("");
        let second = row[1].as_deref().unwrap_or("");

        if first.contains("Origin") || first.contains("Destination") {
            continue;
        }
        if second.contains(DESTINATION_LEGEND) {
            continue;
        }

        let origin_cell = first.trim();
        let values_cell = second.trim();
        if origin_cell.is_empty() || values_cell.is_empty() {
            continue;
        }

        let value_lines: Vec<&str> = values_cell.split('\n').collect();
        for (i, origin_line) in origin_cell.split('\n').enumerate() {
            let Some(origin) = ZoneCode::parse(origin_line.trim()) else {
                continue;
            };
            let Some(values) = value_lines.get(i) else {
                continue;
            };

            let distances: Option<Vec<u8>> = parse_integers(values)
                .into_iter()
                .map(|v| u8::try_from(v).ok())
                .collect();

            match distances {
                Some(distances) if distances.len() == ZONE_CODES.len() => {
                    lines.push((origin, distances));
                }
                _ => log::debug!("Skipping matrix line for {}: wrong shape", origin),
            }
        }
    }

    lines
}

fn is_postal_prefix(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_uppercase()
}

fn is_dash(token: &str) -> bool {
    matches!(token, "-" | "–" | "—")
}
