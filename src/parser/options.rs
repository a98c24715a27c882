//! Extraction options and configuration.

use crate::model::{Country, ServiceDescriptor, SERVICE_CATALOG};

/// Default number of zone tokens a row needs to count as a zone header.
pub const DEFAULT_MIN_HEADER_ZONES: usize = 7;

/// Options for reconstructing a rate sheet.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Origin postal code for zone dataset generation
    pub origin: Option<String>,

    /// Services to detect, in detection order
    pub services: Vec<ServiceDescriptor>,

    /// Marker phrases of the zone index pages
    pub markers: ZoneIndexMarkers,

    /// How repeated freight bracket rows are resolved
    pub bracket_policy: BracketPolicy,

    /// Minimum zone tokens for a zone header row
    pub min_header_zones: usize,

    /// Country labelling for zone dataset rows
    pub country: Country,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (warn instead of failing on document-level problems).
    pub fn lenient(self) -> Self {
        self.with_error_mode(ErrorMode::Lenient)
    }

    /// Set the origin postal code.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Replace the service catalog.
    pub fn with_services(mut self, services: Vec<ServiceDescriptor>) -> Self {
        self.services = services;
        self
    }

    /// Set zone index marker phrases.
    pub fn with_markers(mut self, markers: ZoneIndexMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Set the bracket policy.
    pub fn with_bracket_policy(mut self, policy: BracketPolicy) -> Self {
        self.bracket_policy = policy;
        self
    }

    /// Set the minimum zone token count for header rows.
    pub fn with_min_header_zones(mut self, count: usize) -> Self {
        self.min_header_zones = count.max(1);
        self
    }

    /// Set the country used in zone dataset rows.
    pub fn with_country(mut self, country: Country) -> Self {
        self.country = country;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            origin: None,
            services: SERVICE_CATALOG.to_vec(),
            markers: ZoneIndexMarkers::default(),
            bracket_policy: BracketPolicy::FirstWins,
            min_header_zones: DEFAULT_MIN_HEADER_ZONES,
            country: Country::default(),
        }
    }
}

/// Error handling mode for document-level problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when the document is unrecognized or the zone matrix is missing
    #[default]
    Strict,
    /// Log a warning and continue with whatever could be reconstructed
    Lenient,
}

/// Resolution of a (bracket, zone) rate printed more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketPolicy {
    /// Keep the first rate seen
    #[default]
    FirstWins,
    /// Keep the last rate seen
    LastWins,
}

/// Phrases marking the zone index pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneIndexMarkers {
    /// Marker of the postal-code-to-zone index page
    pub postal_index: String,
    /// Marker of the zone-to-zone distance matrix page
    pub zone_matrix: String,
}

impl Default for ZoneIndexMarkers {
    fn default() -> Self {
        Self {
            postal_index: "Postal Code Zone Index".to_string(),
            zone_matrix: "Intra-Canada Zone Index".to_string(),
        }
    }
}
