//! Model types for extracted pages and reconstructed rate sheets.
//!
//! The input side (`Document`, `Page`, `RawTable`) mirrors what a PDF
//! extraction library hands over. The output side (`PostalZoneMap`,
//! `ZoneMatrix`, `RateTable`, `RateSheet`) is what writers consume.

mod document;
mod page;
mod rate;
mod service;
mod sheet;
mod table;
mod zone;

pub use document::Document;
pub use page::{Page, PageSource};
pub use rate::{Money, RateTable, ServiceRates, MAX_ZONE, MIN_ZONE};
pub use service::{
    BracketPhrase, PageSpan, RateStructure, ServiceDescriptor, WeightBracket, BRACKET_PHRASES,
    FLAT_WEIGHTS, FREIGHT_BRACKETS, FREIGHT_WEIGHTS, OVERAGE_WEIGHTS, PARSED_FLAT_WEIGHTS,
    SERVICE_CATALOG,
};
pub use sheet::{RateSheet, SheetMetadata};
pub use table::{NormalizedRow, RawTable};
pub use zone::{
    Country, PostalRange, PostalZoneMap, ZoneCode, ZoneDatasetRow, ZoneMatrix, NO_ROUTE_ZONE,
    ZONE_CODES,
};
