//! Rate sheet parsing module.
//!
//! The pipeline runs strictly in page order: zone index, origin
//! resolution, service location, then one rate builder per service.

mod candidate;
mod extractor;
mod flat;
mod freight;
mod header;
mod locator;
mod normalize;
mod options;
mod resolver;
mod text;
mod zone_index;
pub mod zone_locator;

pub use candidate::select_table;
pub use extractor::RateSheetExtractor;
pub use flat::build_flat_rates;
pub use freight::build_freight_rates;
pub use header::{HeaderStrategy, ZoneHeader};
pub use locator::{is_title_page, locate_service, locate_services, ClaimedPages, LocatedService};
pub use normalize::normalize_table;
pub use options::{
    BracketPolicy, ErrorMode, ExtractOptions, ZoneIndexMarkers, DEFAULT_MIN_HEADER_ZONES,
};
pub use resolver::ZoneResolver;
pub use text::{
    clean_amount, extend_rate, parse_price_line, parse_weight, round_half_up, PriceToken,
};
pub use zone_index::{
    build_zone_index, find_zone_index_pages, parse_postal_zone_map, parse_zone_matrix, ZoneIndex,
    ZoneIndexPages,
};
pub use zone_locator::{parse_zone_locator, ZipZoneRow};
