//! Table normalization: splitting stacked multi-line cells into rows.
//!
//! Extraction libraries often merge several visual rows into one table row
//! whose cells hold `\n`-separated lines. Rate parsing needs one logical row
//! per line, so each raw row expands into as many rows as its tallest cell
//! has lines.

use crate::model::{NormalizedRow, RawTable};

/// Normalize a raw table into single-line, rectangular rows.
///
/// Every output row has the column count of the raw row it came from.
/// Short cells and absent cells pad with empty strings. A raw row always
/// yields at least one output row.
pub fn normalize_table(table: &RawTable) -> Vec<NormalizedRow> {
    let mut rows = Vec::with_capacity(table.row_count());

    for raw_row in &table.rows {
        let cell_lines: Vec<Vec<&str>> = raw_row
            .iter()
            .map(|cell| match cell {
                Some(text) => split_lines(text),
                None => vec![""],
            })
            .collect();

        let height = cell_lines.iter().map(Vec::len).max().unwrap_or(1).max(1);

        for line_idx in 0..height {
            let cells = cell_lines
                .iter()
                .map(|lines| lines.get(line_idx).copied().unwrap_or("").to_string())
                .collect();
            rows.push(NormalizedRow::new(cells));
        }
    }

    rows
}

/// Split a cell on embedded line breaks.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &NormalizedRow) -> Vec<&str> {
        row.cells.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_single_line_table_is_unchanged() {
        let table = RawTable::from_rows([["1 lb", "10.00 20.00"], ["2 lbs", "11.00 21.00"]]);
        let rows = normalize_table(&table);

        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows[0]), ["1 lb", "10.00 20.00"]);
        assert_eq!(cells(&rows[1]), ["2 lbs", "11.00 21.00"]);
    }

    #[test]
    fn test_stacked_cells_expand() {
        let table = RawTable {
            rows: vec![vec![
                Some("1 lb\n2 lbs\n3 lbs".to_string()),
                Some("10.00\n11.00".to_string()),
                None,
            ]],
        };
        let rows = normalize_table(&table);

        assert_eq!(rows.len(), 3);
        assert_eq!(cells(&rows[0]), ["1 lb", "10.00", ""]);
        assert_eq!(cells(&rows[1]), ["2 lbs", "11.00", ""]);
        assert_eq!(cells(&rows[2]), ["3 lbs", "", ""]);
    }

    #[test]
    fn test_output_is_rectangular_per_row() {
        let table = RawTable {
            rows: vec![
                vec![Some("a\nb".to_string()), None],
                vec![None, None, Some("x\ny\nz".to_string())],
                vec![],
            ],
        };
        let rows = normalize_table(&table);

        // 2 + 3 + 1 rows, widths follow their source row
        assert_eq!(rows.len(), 6);
        assert!(rows[..2].iter().all(|r| r.len() == 2));
        assert!(rows[2..5].iter().all(|r| r.len() == 3));
        assert!(rows[5].is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let table = RawTable {
            rows: vec![vec![Some("DA\nDB".to_string()), Some("1 2\n2 1".to_string())]],
        };
        let once = normalize_table(&table);
        let again = normalize_table(&RawTable {
            rows: once
                .iter()
                .map(|r| r.cells.iter().cloned().map(Some).collect())
                .collect(),
        });

        assert_eq!(once, again);
    }

    #[test]
    fn test_crlf_line_breaks() {
        let table = RawTable {
            rows: vec![vec![Some("1 lb\r\n2 lbs".to_string())]],
        };
        let rows = normalize_table(&table);
        assert_eq!(cells(&rows[0]), ["1 lb"]);
        assert_eq!(cells(&rows[1]), ["2 lbs"]);
    }
}
