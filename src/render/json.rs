//! JSON rendering for rate sheets.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::RateSheet;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a rate sheet to JSON.
pub fn to_json(sheet: &RateSheet, format: JsonFormat) -> Result<String> {
    to_json_value(sheet, format)
}

/// Convert any serializable part of a sheet (a zone dataset, one service) to JSON.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
