//! Origin resolution and zone dataset expansion.

use crate::model::{Country, PostalRange, PostalZoneMap, ZoneCode, ZoneDatasetRow, ZoneMatrix};

/// Number of leading postal code characters that select a zone.
const PREFIX_LEN: usize = 3;

/// Resolves postal codes against a parsed zone index.
#[derive(Debug, Clone, Copy)]
pub struct ZoneResolver<'a> {
    postal_zones: &'a PostalZoneMap,
    matrix: &'a ZoneMatrix,
}

impl<'a> ZoneResolver<'a> {
    /// Create a resolver over a postal map and its zone matrix.
    pub fn new(postal_zones: &'a PostalZoneMap, matrix: &'a ZoneMatrix) -> Self {
        Self {
            postal_zones,
            matrix,
        }
    }

    /// Resolve an origin postal code to its zone code.
    ///
    /// Only the first three characters matter, case-insensitively. Shorter
    /// codes never resolve.
    pub fn resolve_origin(&self, origin: &str) -> Option<ZoneCode> {
        let prefix = origin_prefix(origin)?;
        let (range, zone) = self.postal_zones.lookup(&prefix)?;
        log::debug!("Origin prefix {} falls in range {} ({})", prefix, range, zone);
        Some(zone)
    }

    /// Distance zone from an origin code to every destination range.
    ///
    /// Rows follow ascending range order. Pairs missing from the matrix get
    /// the no-route zone 16.
    pub fn dataset(&self, origin: ZoneCode, country: &Country) -> Vec<ZoneDatasetRow> {
        self.postal_zones
            .iter()
            .map(|(range, destination)| {
                dataset_row(range, self.matrix.distance_or_no_route(origin, destination), country)
            })
            .collect()
    }
}

fn origin_prefix(origin: &str) -> Option<String> {
    let trimmed = origin.trim();
    if trimmed.chars().count() < PREFIX_LEN {
        return None;
    }
    Some(trimmed.chars().take(PREFIX_LEN).collect::<String>().to_uppercase())
}

fn dataset_row(range: &PostalRange, zone: u8, country: &Country) -> ZoneDatasetRow {
    ZoneDatasetRow {
        country_name: country.name.clone(),
        country_symbol: country.symbol.clone(),
        zone,
        city: String::new(),
        start_postal_code: range.start.clone(),
        end_postal_code: range.end.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_ROUTE_ZONE;

    fn code(s: &str) -> ZoneCode {
        ZoneCode::parse(s).unwrap()
    }

    fn sample() -> (PostalZoneMap, ZoneMatrix) {
        let mut map = PostalZoneMap::new();
        map.insert(PostalRange::single("M5V"), code("DA"));
        map.insert(PostalRange::new("M5W", "M5Z"), code("DB"));
        map.insert(PostalRange::new("X0A", "X0C"), code("DZ"));

        let mut matrix = ZoneMatrix::new();
        matrix.insert(code("DA"), code("DA"), 1);
        matrix.insert(code("DA"), code("DB"), 5);
        (map, matrix)
    }

    #[test]
    fn test_resolve_origin() {
        let (map, matrix) = sample();
        let resolver = ZoneResolver::new(&map, &matrix);

        assert_eq!(resolver.resolve_origin("M5V1A1"), Some(code("DA")));
        assert_eq!(resolver.resolve_origin("m5v 1a1"), Some(code("DA")));
        assert_eq!(resolver.resolve_origin("M5X 2B2"), Some(code("DB")));
        assert_eq!(resolver.resolve_origin("H2X"), None);
        assert_eq!(resolver.resolve_origin("M5"), None);
        assert_eq!(resolver.resolve_origin(""), None);
    }

    #[test]
    fn test_dataset_uses_matrix_and_no_route() {
        let (map, matrix) = sample();
        let resolver = ZoneResolver::new(&map, &matrix);
        let rows = resolver.dataset(code("DA"), &Country::default());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].start_postal_code, "M5V");
        assert_eq!(rows[0].zone, 1);
        assert_eq!(rows[1].start_postal_code, "M5W");
        assert_eq!(rows[1].end_postal_code, "M5Z");
        assert_eq!(rows[1].zone, 5);
        assert_eq!(rows[2].zone, NO_ROUTE_ZONE);
        assert!(rows.iter().all(|r| r.city.is_empty() && r.country_symbol == "CA"));
    }

    #[test]
    fn test_empty_matrix_yields_no_route_everywhere() {
        let (map, _) = sample();
        let matrix = ZoneMatrix::new();
        let resolver = ZoneResolver::new(&map, &matrix);
        let origin = resolver.resolve_origin("M5V1A1").unwrap();
        let rows = resolver.dataset(origin, &Country::new("Canada", "CA"));

        assert!(rows.iter().all(|r| r.zone == NO_ROUTE_ZONE));
    }
}
