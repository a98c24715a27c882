//! US zone locator parsing.
//!
//! A zone locator lists destination ZIP ranges with their zone, in two
//! sections: the contiguous U.S. (one zone per range) and Alaska, Hawaii
//! and Puerto Rico (an express zone and a ground zone per range, of which
//! the express zone is kept).

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::detect::is_zone_locator;
use crate::error::{Error, Result};

fn contiguous_section() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)Contiguous U\.S\.(.*?)Alaska,\s*Hawaii").unwrap())
}

fn remote_section() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)Alaska,\s*Hawaii,?\s*and\s*Puerto\s*Rico(.*)$").unwrap()
    })
}

fn single_zone_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{5}(?:-\d{5})?)\s+(\d+|NA|\*)").unwrap())
}

fn dual_zone_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{5}(?:-\d{5})?)\s+(\d+|NA|\*)\s+(\d+|NA|\*)").unwrap())
}

/// One destination ZIP range of a zone locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZipZoneRow {
    /// First ZIP code
    pub start: String,
    /// Last ZIP code
    pub end: String,
    /// Zone, `None` where the locator prints `NA` or `*`
    pub zone: Option<String>,
}

impl ZipZoneRow {
    fn new(zip_range: &str, zone: &str) -> Self {
        let (start, end) = match zip_range.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (zip_range.trim(), zip_range.trim()),
        };
        Self {
            start: start.to_string(),
            end: end.to_string(),
            zone: normalize_zone(zone),
        }
    }
}

fn normalize_zone(zone: &str) -> Option<String> {
    if zone.eq_ignore_ascii_case("NA") || zone == "*" {
        None
    } else {
        Some(zone.to_string())
    }
}

/// Parse a zone locator into rows sorted by start ZIP.
pub fn parse_zone_locator(text: &str) -> Result<Vec<ZipZoneRow>> {
    if !is_zone_locator(text) {
        return Err(Error::UnrecognizedDocument(
            "text does not appear to be a zone locator".to_string(),
        ));
    }

    let mut rows = Vec::new();

    if let Some(section) = contiguous_section().captures(text) {
        rows.extend(
            single_zone_entry()
                .captures_iter(&section[1])
                .map(|caps| ZipZoneRow::new(&caps[1], &caps[2])),
        );
    } else {
        log::warn!("No contiguous U.S. section found");
    }
    let contiguous = rows.len();

    if let Some(section) = remote_section().captures(text) {
        rows.extend(
            dual_zone_entry()
                .captures_iter(&section[1])
                .map(|caps| ZipZoneRow::new(&caps[1], &caps[2])),
        );
    } else {
        log::warn!("No Alaska, Hawaii and Puerto Rico section found");
    }

    if rows.is_empty() {
        return Err(Error::Other("No zone data could be extracted".to_string()));
    }

    log::info!(
        "Parsed {} contiguous and {} remote ZIP ranges",
        contiguous,
        rows.len() - contiguous
    );

    rows.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(rows)
}
