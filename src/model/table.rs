//! Table types.

use serde::{Deserialize, Serialize};

/// A table as handed over by the extraction library.
///
/// Rows are ordered top to bottom and cells left to right. A cell is either
/// absent (`None`) or a string that may contain embedded line breaks, each
/// line being one stacked logical sub-row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    /// Rows in the table
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of present cells.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the text of a cell, treating absent cells as missing.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// A single-line row produced by the table normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Cells in the row, one line each
    pub cells: Vec<String>,
}

impl NormalizedRow {
    /// Create a row from cell values.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a trimmed cell, or an empty string past the row end.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(|c| c.trim()).unwrap_or("")
    }

    /// The row label (first column).
    pub fn label(&self) -> &str {
        self.cell(0)
    }

    /// The row values (second column).
    pub fn values(&self) -> &str {
        self.cell(1)
    }
}
