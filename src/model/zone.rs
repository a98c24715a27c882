//! Postal-zone and zone-distance types.

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Zone codes in catalog order. Matrix rows and columns follow this order.
pub const ZONE_CODES: [&str; 26] = [
    "DA", "DB", "DC", "DD", "DE", "DF", "DG", "DH", "DI", "DJ", "DK", "DL", "DM", "DN", "DO", "DP",
    "DQ", "DR", "DS", "DT", "DU", "DV", "DW", "DX", "DY", "DZ",
];

/// Distance zone used when no matrix entry exists (no route / longest distance).
pub const NO_ROUTE_ZONE: u8 = 16;

/// A two-letter zone code from [`ZONE_CODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneCode(u8);

impl ZoneCode {
    /// Parse an exact zone code token.
    pub fn parse(token: &str) -> Option<Self> {
        ZONE_CODES
            .iter()
            .position(|code| *code == token)
            .map(|i| ZoneCode(i as u8))
    }

    /// All zone codes in catalog order.
    pub fn all() -> impl Iterator<Item = ZoneCode> {
        (0..ZONE_CODES.len() as u8).map(ZoneCode)
    }

    /// Position in the catalog.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The code text, e.g. `"DA"`.
    pub fn as_str(self) -> &'static str {
        ZONE_CODES[self.0 as usize]
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ZoneCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An inclusive range of postal prefixes, compared lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct PostalRange {
    /// First prefix in the range
    pub start: String,
    /// Last prefix in the range
    pub end: String,
}

impl PostalRange {
    /// Create a range from its bounds.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a range covering exactly one prefix.
    pub fn single(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            start: code.clone(),
            end: code,
        }
    }

    /// Check whether the range covers exactly one prefix.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `prefix` lies within the bounds.
    pub fn contains(&self, prefix: &str) -> bool {
        self.start.as_str() <= prefix && prefix <= self.end.as_str()
    }

    /// True if `self` fits more tightly around a prefix than `other`.
    fn is_tighter_than(&self, other: &PostalRange) -> bool {
        self.start > other.start || (self.start == other.start && self.end < other.end)
    }
}

impl fmt::Display for PostalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Mapping from postal ranges to zone codes, iterated in ascending range order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalZoneMap {
    entries: BTreeMap<PostalRange, ZoneCode>,
}

impl PostalZoneMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a range, replacing any previous zone for the same bounds.
    pub fn insert(&mut self, range: PostalRange, zone: ZoneCode) -> Option<ZoneCode> {
        self.entries.insert(range, zone)
    }

    /// Zone for an exact range.
    pub fn get(&self, range: &PostalRange) -> Option<ZoneCode> {
        self.entries.get(range).copied()
    }

    /// Check whether a multi-prefix range already starts at `code`.
    pub fn has_wider_range_starting_at(&self, code: &str) -> bool {
        self.entries
            .keys()
            .any(|range| range.start == code && range.end != code)
    }

    /// Find the tightest range containing `prefix`.
    ///
    /// Among containing ranges the one with the greatest start wins, then
    /// the one with the smallest end, so single-prefix entries are never
    /// shadowed by a wider range.
    pub fn lookup(&self, prefix: &str) -> Option<(&PostalRange, ZoneCode)> {
        let mut best: Option<(&PostalRange, ZoneCode)> = None;
        for (range, zone) in &self.entries {
            if !range.contains(prefix) {
                continue;
            }
            match best {
                Some((current, _)) if !range.is_tighter_than(current) => {}
                _ => best = Some((range, *zone)),
            }
        }
        best
    }

    /// Iterate entries in ascending range order.
    pub fn iter(&self) -> impl Iterator<Item = (&PostalRange, ZoneCode)> {
        self.entries.iter().map(|(range, zone)| (range, *zone))
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(serde::Serialize)]
struct PostalZoneEntry<'a> {
    start: &'a str,
    end: &'a str,
    zone: ZoneCode,
}

impl Serialize for PostalZoneMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(range, zone)| PostalZoneEntry {
            start: &range.start,
            end: &range.end,
            zone,
        }))
    }
}

/// Mapping from (origin zone, destination zone) to distance zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ZoneMatrix {
    distances: BTreeMap<ZoneCode, BTreeMap<ZoneCode, u8>>,
}

impl ZoneMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the distance zone between two zone codes.
    pub fn insert(&mut self, origin: ZoneCode, destination: ZoneCode, distance: u8) {
        self.distances
            .entry(origin)
            .or_default()
            .insert(destination, distance);
    }

    /// Distance zone between two zone codes, if the document defines one.
    pub fn get(&self, origin: ZoneCode, destination: ZoneCode) -> Option<u8> {
        self.distances
            .get(&origin)
            .and_then(|row| row.get(&destination))
            .copied()
    }

    /// Distance zone, falling back to [`NO_ROUTE_ZONE`].
    pub fn distance_or_no_route(&self, origin: ZoneCode, destination: ZoneCode) -> u8 {
        self.get(origin, destination).unwrap_or(NO_ROUTE_ZONE)
    }

    /// Origin codes that have at least one entry.
    pub fn origins(&self) -> impl Iterator<Item = ZoneCode> + '_ {
        self.distances.keys().copied()
    }

    /// Total number of (origin, destination) entries.
    pub fn len(&self) -> usize {
        self.distances.values().map(BTreeMap::len).sum()
    }

    /// Check if the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Country labelling for zone dataset rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Country name, e.g. "Canada"
    pub name: String,
    /// Country symbol, e.g. "CA"
    pub symbol: String,
}

impl Country {
    /// Create a country label.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::new("Canada", "CA")
    }
}

/// One destination postal range resolved against an origin.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ZoneDatasetRow {
    /// Country name
    pub country_name: String,
    /// Country symbol
    pub country_symbol: String,
    /// Distance zone (1..16)
    pub zone: u8,
    /// City placeholder, always empty
    pub city: String,
    /// Start postal prefix
    pub start_postal_code: String,
    /// End postal prefix
    pub end_postal_code: String,
}
