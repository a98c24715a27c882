//! Rate sheet reconstruction pipeline.

use chrono::Utc;

use super::flat::build_flat_rates;
use super::freight::build_freight_rates;
use super::locator::{locate_services, LocatedService};
use super::options::{BracketPolicy, ErrorMode, ExtractOptions, ZoneIndexMarkers};
use super::resolver::ZoneResolver;
use super::zone_index::{build_zone_index, ZoneIndex};
use crate::detect::check_rate_document;
use crate::error::{Error, Result};
use crate::model::{
    Country, Document, PageSource, RateSheet, RateStructure, ServiceDescriptor, ServiceRates,
    SheetMetadata, ZoneCode, ZoneDatasetRow,
};

/// Reconstructs rate sheets from extracted pages.
///
/// # Example
///
/// ```
/// use ratesheet::{Page, RateSheetExtractor};
///
/// let pages = vec![Page::new(1).with_text("FedEx Economy Rates by zone")];
/// let sheet = RateSheetExtractor::new().lenient().extract(&pages)?;
/// assert_eq!(sheet.metadata.page_count, 1);
/// # Ok::<(), ratesheet::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateSheetExtractor {
    options: ExtractOptions,
}

impl RateSheetExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from existing options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Warn instead of failing on document-level problems.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the origin postal code.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.options = self.options.with_origin(origin);
        self
    }

    /// Replace the service catalog.
    pub fn with_services(mut self, services: Vec<ServiceDescriptor>) -> Self {
        self.options = self.options.with_services(services);
        self
    }

    /// Set zone index marker phrases.
    pub fn with_markers(mut self, markers: ZoneIndexMarkers) -> Self {
        self.options = self.options.with_markers(markers);
        self
    }

    /// Set the bracket policy for freight services.
    pub fn with_bracket_policy(mut self, policy: BracketPolicy) -> Self {
        self.options = self.options.with_bracket_policy(policy);
        self
    }

    /// Set the minimum zone token count for header rows.
    pub fn with_min_header_zones(mut self, count: usize) -> Self {
        self.options = self.options.with_min_header_zones(count);
        self
    }

    /// Set the country used in zone dataset rows.
    pub fn with_country(mut self, country: Country) -> Self {
        self.options = self.options.with_country(country);
        self
    }

    /// Reconstruct a rate sheet from pages.
    pub fn extract<P: PageSource>(&self, pages: &[P]) -> Result<RateSheet> {
        self.extract_with(pages, |_| {})
    }

    /// Reconstruct a rate sheet from a loaded document, keeping its source name.
    pub fn extract_document(&self, document: &Document) -> Result<RateSheet> {
        let mut sheet = self.extract(&document.pages)?;
        sheet.metadata.source = document.source.clone();
        Ok(sheet)
    }

    /// Reconstruct a rate sheet, calling `on_service` after each service is built.
    pub fn extract_with<P, F>(&self, pages: &[P], mut on_service: F) -> Result<RateSheet>
    where
        P: PageSource,
        F: FnMut(&ServiceRates),
    {
        if let Err(err) = check_rate_document(pages, &self.options.services) {
            match self.options.error_mode {
                ErrorMode::Strict => return Err(err),
                ErrorMode::Lenient => log::warn!("{}, continuing", err),
            }
        }

        let index = build_zone_index(pages, &self.options.markers);
        let (origin_zone, zones) = self.resolve_zones(&index)?;

        let mut services = Vec::new();
        for located in self.locate(pages) {
            let service = self.build_service(pages, &located);
            log::info!(
                "{}: {} weights, {} amounts",
                service.name,
                service.rates.weight_count(),
                service.rates.value_count()
            );
            on_service(&service);
            services.push(service);
        }

        Ok(RateSheet {
            metadata: SheetMetadata {
                source: None,
                page_count: pages.len() as u32,
                origin: self.options.origin.clone(),
                extracted_at: Some(Utc::now()),
            },
            postal_zones: index.postal_zones,
            zone_matrix: index.matrix,
            origin_zone,
            zones,
            services,
        })
    }

    /// Locate the catalog services in the pages.
    pub fn locate<P: PageSource>(&self, pages: &[P]) -> Vec<LocatedService> {
        locate_services(&self.options.services, pages)
    }

    /// Build the rate table of one located service.
    pub fn build_service<P: PageSource>(
        &self,
        pages: &[P],
        located: &LocatedService,
    ) -> ServiceRates {
        let descriptor = &located.descriptor;
        let rates = match descriptor.structure {
            RateStructure::Flat => {
                build_flat_rates(pages, located.span, self.options.min_header_zones)
            }
            RateStructure::Freight => build_freight_rates(
                pages,
                located.span,
                self.options.bracket_policy,
                self.options.min_header_zones,
            ),
        };
        ServiceRates::new(descriptor.name, descriptor.structure, located.span, rates)
    }

    /// Resolve the configured origin into its zone code and dataset.
    fn resolve_zones(
        &self,
        index: &ZoneIndex,
    ) -> Result<(Option<ZoneCode>, Option<Vec<ZoneDatasetRow>>)> {
        let Some(origin) = self.options.origin.as_deref() else {
            return Ok((None, None));
        };

        if index.matrix.is_empty() {
            match self.options.error_mode {
                ErrorMode::Strict => return Err(Error::MissingZoneMatrix),
                ErrorMode::Lenient => {
                    log::warn!("Zone matrix not found, every distance falls back to zone 16")
                }
            }
        }

        let resolver = ZoneResolver::new(&index.postal_zones, &index.matrix);
        match resolver.resolve_origin(origin) {
            Some(zone) => {
                log::info!("Origin {} resolved to zone code {}", origin, zone);
                let rows = resolver.dataset(zone, &self.options.country);
                Ok((Some(zone), Some(rows)))
            }
            None => {
                log::warn!("Origin {} not found in the postal code index, skipping zones", origin);
                Ok((None, None))
            }
        }
    }
}
