//! Zone-column header detection.

use super::text::parse_zone_numbers;
use crate::model::NormalizedRow;

/// Rows searched for a flat-rate header.
const FLAT_HEADER_ROWS: usize = 5;

/// Where a rate table prints its zone-column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Any cell of the first five rows
    Flat,
    /// The values column of the first qualifying row
    Freight,
}

/// A detected zone header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneHeader {
    /// Row index of the header in the normalized table
    pub row: usize,
    /// Zone columns in printed order
    pub zones: Vec<u8>,
}

impl ZoneHeader {
    /// Number of zone columns.
    pub fn width(&self) -> usize {
        self.zones.len()
    }
}

impl HeaderStrategy {
    /// Find the zone header of a normalized table.
    ///
    /// A candidate cell needs at least `min_zones` zone numbers.
    pub fn find(self, rows: &[NormalizedRow], min_zones: usize) -> Option<ZoneHeader> {
        match self {
            HeaderStrategy::Flat => rows
                .iter()
                .take(FLAT_HEADER_ROWS)
                .enumerate()
                .find_map(|(row, cells)| {
                    cells
                        .cells
                        .iter()
                        .map(|cell| parse_zone_numbers(cell))
                        .find(|zones| zones.len() >= min_zones)
                        .map(|zones| ZoneHeader { row, zones })
                }),
            HeaderStrategy::Freight => rows.iter().enumerate().find_map(|(row, cells)| {
                let zones = parse_zone_numbers(cells.values());
                (zones.len() >= min_zones).then_some(ZoneHeader { row, zones })
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> NormalizedRow {
        NormalizedRow::from_strings(cells.iter().copied())
    }

    #[test]
    fn test_flat_header_in_any_cell() {
        let rows = vec![
            row(&["FedEx Economy Rates", ""]),
            row(&["", "", "Zones 2 3 4 5 6 7 8 9"]),
            row(&["1 lb", "10.00"]),
        ];
        let header = HeaderStrategy::Flat.find(&rows, 7).unwrap();
        assert_eq!(header.row, 1);
        assert_eq!(header.zones, vec![2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(header.width(), 8);
    }

    #[test]
    fn test_flat_header_only_in_leading_rows() {
        let mut rows: Vec<_> = (0..5).map(|_| row(&["note", "text"])).collect();
        rows.push(row(&["Zone", "1 2 3 4 5 6 7"]));
        assert!(HeaderStrategy::Flat.find(&rows, 7).is_none());
        assert!(HeaderStrategy::Freight.find(&rows, 7).is_some());
    }

    #[test]
    fn test_freight_header_requires_values_column() {
        let rows = vec![row(&["1 2 3 4 5 6 7", "Zones"]), row(&["Zones", "1 2 3 4 5 6 7"])];
        let header = HeaderStrategy::Freight.find(&rows, 7).unwrap();
        assert_eq!(header.row, 1);
    }

    #[test]
    fn test_min_zones_threshold() {
        let rows = vec![row(&["Zone", "1 2"])];
        assert!(HeaderStrategy::Freight.find(&rows, 7).is_none());
        assert_eq!(HeaderStrategy::Freight.find(&rows, 2).unwrap().zones, vec![1, 2]);
    }
}
