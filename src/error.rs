//! Error types for ratesheet library.

use std::io;
use thiserror::Error;

/// Result type alias for ratesheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a rate sheet.
///
/// Only document-level failures surface here. Heuristic mismatches during
/// row and table scanning (wrong token counts, unparsable weights) are
/// skipped locally and never become an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The extracted-page document could not be decoded.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The document does not look like a carrier rate document.
    #[error("Unrecognized rate document: {0}")]
    UnrecognizedDocument(String),

    /// An origin was supplied but the document has no zone matrix.
    #[error("Zone matrix not found: cannot resolve distance zones")]
    MissingZoneMatrix,

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidDocument(err.to_string())
    }
}
