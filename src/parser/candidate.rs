//! Scored selection among the tables extracted from one page.
//!
//! A page often carries several tables (legends, footnotes, the grid itself).
//! Instead of trusting position or size alone, each candidate is scored by
//! how well it matches the expected shape and the best one is kept.

use crate::model::RawTable;

/// Pick the highest-scoring table.
///
/// `score` returns `None` for tables that must never be chosen. Ties go to
/// the earliest table. Returns the index and the table.
pub fn select_table<'a, S, F>(tables: &'a [RawTable], mut score: F) -> Option<(usize, &'a RawTable)>
where
    S: Ord,
    F: FnMut(&RawTable) -> Option<S>,
{
    let mut best: Option<(usize, &'a RawTable, S)> = None;

    for (idx, table) in tables.iter().enumerate() {
        let Some(table_score) = score(table) else {
            continue;
        };
        let better = best
            .as_ref()
            .map_or(true, |(_, _, current)| table_score > *current);
        if better {
            log::debug!("select_table: table {} is the best candidate so far", idx);
            best = Some((idx, table, table_score));
        }
    }

    best.map(|(idx, table, _)| (idx, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_rows(n: usize) -> RawTable {
        RawTable::from_rows((0..n).map(|i| vec![i.to_string()]))
    }

    #[test]
    fn test_select_highest_score() {
        let tables = vec![table_with_rows(2), table_with_rows(5), table_with_rows(3)];
        let (idx, table) = select_table(&tables, |t| Some(t.row_count())).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_ties_keep_earliest() {
        let tables = vec![table_with_rows(4), table_with_rows(4)];
        let (idx, _) = select_table(&tables, |t| Some(t.row_count())).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_ineligible_tables_skipped() {
        let tables = vec![table_with_rows(9), table_with_rows(1)];
        let (idx, _) = select_table(&tables, |t| (t.row_count() < 5).then_some(0)).unwrap();
        assert_eq!(idx, 1);

        assert!(select_table(&tables, |_| None::<usize>).is_none());
        assert!(select_table(&[], |t| Some(t.row_count())).is_none());
    }
}
