//! # ratesheet
//!
//! Carrier rate sheet reconstruction from extracted PDF pages.
//!
//! A PDF extraction library hands over, per page, plain text and raw
//! tables. This crate turns those into structured data: a postal-code to
//! zone-code index, a zone-to-zone distance matrix, and a price grid per
//! shipping service.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ratesheet::{extract_file, render, ExtractOptions};
//!
//! fn main() -> ratesheet::Result<()> {
//!     let options = ExtractOptions::new().with_origin("M5V 1A1");
//!     let sheet = extract_file("CA_2026.json", options)?;
//!
//!     println!("{}", render::to_json(&sheet, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Zone index**: postal ranges to zone codes, plus the distance matrix
//! - **Origin resolution**: distance zone from one origin to every range
//! - **Flat-rate services**: per-weight prices with per-pound overage
//! - **Freight services**: bracket rates expanded per pound, with minimums
//! - **Exact money**: `rust_decimal`, half-up rounding to cents
//! - **US zone locators**: ZIP range to zone parsing

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{
    check_rate_document, detect_kind, is_zone_locator, mentioned_services, DocumentKind,
};
pub use error::{Error, Result};
pub use model::{
    Country, Document, Money, Page, PageSource, PageSpan, PostalRange, PostalZoneMap, RateSheet,
    RateStructure, RateTable, RawTable, ServiceDescriptor, ServiceRates, SheetMetadata, ZoneCode,
    ZoneDatasetRow, ZoneMatrix, NO_ROUTE_ZONE, SERVICE_CATALOG, ZONE_CODES,
};
pub use parser::{
    parse_zone_locator, BracketPolicy, ErrorMode, ExtractOptions, RateSheetExtractor, ZipZoneRow,
};
pub use render::JsonFormat;

use std::path::Path;

/// Reconstruct a rate sheet from pages with default options.
///
/// # Example
///
/// ```
/// use ratesheet::{extract, Page};
///
/// let pages = vec![Page::new(1).with_text("Weekly report")];
/// assert!(extract(&pages).is_err());
/// ```
pub fn extract<P: PageSource>(pages: &[P]) -> Result<RateSheet> {
    RateSheetExtractor::new().extract(pages)
}

/// Reconstruct a rate sheet from pages with custom options.
///
/// # Example
///
/// ```
/// use ratesheet::{extract_with_options, ExtractOptions, Page};
///
/// let pages = vec![Page::new(1).with_text("Weekly report")];
/// let sheet = extract_with_options(&pages, ExtractOptions::new().lenient()).unwrap();
/// assert!(sheet.services.is_empty());
/// ```
pub fn extract_with_options<P: PageSource>(
    pages: &[P],
    options: ExtractOptions,
) -> Result<RateSheet> {
    RateSheetExtractor::with_options(options).extract(pages)
}

/// Load an extracted-page document from a JSON file.
///
/// # Example
///
/// ```no_run
/// let doc = ratesheet::load_document("CA_2026.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    Document::from_path(path)
}

/// Load a document and reconstruct its rate sheet.
pub fn extract_file<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<RateSheet> {
    let document = load_document(path)?;
    RateSheetExtractor::with_options(options).extract_document(&document)
}
