//! Document recognition.
//!
//! Coarse checks run before any heuristic parsing, so that a document of
//! the wrong kind fails loudly instead of producing an empty sheet.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{PageSource, ServiceDescriptor};

fn zip_zone_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{5}(?:-\d{5})?\s+\d+").unwrap())
}

/// What kind of carrier document a text appears to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Rate document with zone index and service rate tables
    RateSheet,
    /// US zone locator listing ZIP ranges
    ZoneLocator,
    /// Neither
    Unknown,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::RateSheet => write!(f, "rate sheet"),
            DocumentKind::ZoneLocator => write!(f, "zone locator"),
            DocumentKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a whole-document text.
pub fn detect_kind(text: &str, catalog: &[ServiceDescriptor]) -> DocumentKind {
    if check_rate_text(text, catalog).is_ok() {
        DocumentKind::RateSheet
    } else if is_zone_locator(text) {
        DocumentKind::ZoneLocator
    } else {
        DocumentKind::Unknown
    }
}

/// Names of catalog services whose detection phrase appears in the pages.
pub fn mentioned_services<P: PageSource>(
    pages: &[P],
    catalog: &[ServiceDescriptor],
) -> Vec<&'static str> {
    let text = joined_text(pages);
    catalog
        .iter()
        .filter(|service| text.contains(service.detection))
        .map(|service| service.name)
        .collect()
}

/// Check that the pages look like a rate document.
///
/// The text must mention "rates" and "zone" (any case) and at least one
/// catalog service.
///
/// # Errors
/// `Error::UnrecognizedDocument` naming the first missing ingredient.
pub fn check_rate_document<P: PageSource>(
    pages: &[P],
    catalog: &[ServiceDescriptor],
) -> Result<()> {
    if pages.is_empty() {
        return Err(Error::UnrecognizedDocument("document has no pages".to_string()));
    }

    check_rate_text(&joined_text(pages), catalog)
}

/// Check whether text looks like a US zone locator: it mentions FedEx and
/// zones and holds at least one ZIP/zone pair.
pub fn is_zone_locator(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("fedex") && lower.contains("zone") && zip_zone_pair().is_match(text)
}

fn check_rate_text(text: &str, catalog: &[ServiceDescriptor]) -> Result<()> {
    let lower = text.to_lowercase();

    if !lower.contains("rates") {
        return Err(Error::UnrecognizedDocument("no mention of rates".to_string()));
    }
    if !lower.contains("zone") {
        return Err(Error::UnrecognizedDocument("no mention of zones".to_string()));
    }
    if !catalog.iter().any(|service| text.contains(service.detection)) {
        return Err(Error::UnrecognizedDocument("no known service found".to_string()));
    }

    Ok(())
}

fn joined_text<P: PageSource>(pages: &[P]) -> String {
    pages
        .iter()
        .map(|page| page.text().into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, SERVICE_CATALOG};

    #[test]
    fn test_check_rate_document() {
        let pages = vec![
            Page::new(1).with_text("Postal Code Zone Index"),
            Page::new(2).with_text("FedEx Economy Rates"),
        ];
        assert!(check_rate_document(&pages, SERVICE_CATALOG).is_ok());
    }

    #[test]
    fn test_check_rate_document_failures() {
        let empty: Vec<Page> = Vec::new();
        assert!(matches!(
            check_rate_document(&empty, SERVICE_CATALOG),
            Err(Error::UnrecognizedDocument(_))
        ));

        let no_zone = vec![Page::new(1).with_text("FedEx Economy Rates")];
        let err = check_rate_document(&no_zone, SERVICE_CATALOG).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized rate document: no mention of zones");

        let no_service = vec![Page::new(1).with_text("Ground Rates by zone")];
        let err = check_rate_document(&no_service, SERVICE_CATALOG).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized rate document: no known service found");
    }

    #[test]
    fn test_mentioned_services() {
        let pages = vec![Page::new(1).with_text("FedEx 2Day Rates\nFedEx 1Day Freight Rates")];
        assert_eq!(
            mentioned_services(&pages, SERVICE_CATALOG),
            vec!["FedEx 2Day", "FedEx 1Day Freight"]
        );
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind("FedEx Economy Rates by Zone", SERVICE_CATALOG),
            DocumentKind::RateSheet
        );
        assert_eq!(
            detect_kind("FedEx Zone Locator\n00500 8", SERVICE_CATALOG),
            DocumentKind::ZoneLocator
        );
        assert_eq!(detect_kind("hello", SERVICE_CATALOG), DocumentKind::Unknown);
        assert_eq!(DocumentKind::ZoneLocator.to_string(), "zone locator");
    }

    #[test]
    fn test_is_zone_locator() {
        assert!(is_zone_locator("FedEx zone chart 10001 5"));
        assert!(!is_zone_locator("FedEx zone"));
        assert!(!is_zone_locator("UPS zone 10001 5"));
    }
}
