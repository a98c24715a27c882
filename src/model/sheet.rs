//! The reconstructed rate sheet handed to writers.

use super::{PostalZoneMap, ServiceRates, ZoneCode, ZoneDatasetRow, ZoneMatrix};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything reconstructed from one rate document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RateSheet {
    /// Sheet metadata
    pub metadata: SheetMetadata,

    /// Postal ranges to zone codes
    pub postal_zones: PostalZoneMap,

    /// Zone code to zone code distances
    pub zone_matrix: ZoneMatrix,

    /// Zone code the origin postal code resolved to
    pub origin_zone: Option<ZoneCode>,

    /// Destination ranges resolved against the origin
    pub zones: Option<Vec<ZoneDatasetRow>>,

    /// Detected services in catalog order
    pub services: Vec<ServiceRates>,
}

impl RateSheet {
    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceRates> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Total number of amounts across all services.
    pub fn rate_count(&self) -> usize {
        self.services.iter().map(|s| s.rates.value_count()).sum()
    }
}

/// Rate sheet metadata.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetMetadata {
    /// Source document name
    pub source: Option<String>,

    /// Number of pages scanned
    pub page_count: u32,

    /// Origin postal code as supplied
    pub origin: Option<String>,

    /// When the sheet was reconstructed
    pub extracted_at: Option<DateTime<Utc>>,
}
