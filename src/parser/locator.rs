//! Service section location.
//!
//! Each service prints a title line such as "FedEx Economy Rates" near the
//! top of its first page. Services are matched in catalog order and every
//! match claims its page span, so a later service never starts inside a
//! span an earlier one already owns.

use crate::model::{PageSource, PageSpan, ServiceDescriptor};

/// Title lines searched per page.
const TITLE_LINES: usize = 5;

/// Word that must share the title line with the detection phrase.
const RATES_WORD: &str = "Rates";

/// Page spans claimed by services located so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedPages {
    spans: Vec<PageSpan>,
}

impl ClaimedPages {
    /// No pages claimed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a page belongs to a claimed span.
    pub fn is_claimed(&self, page: usize) -> bool {
        self.spans.iter().any(|span| span.contains(page))
    }

    /// Claim a span.
    pub fn claim(&mut self, span: PageSpan) {
        self.spans.push(span);
    }

    /// Claimed spans in claim order.
    pub fn spans(&self) -> &[PageSpan] {
        &self.spans
    }
}

/// A service matched to its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedService {
    /// Catalog entry
    pub descriptor: ServiceDescriptor,
    /// Pages holding its rate tables
    pub span: PageSpan,
}

/// Check whether a page carries the title line of a service.
pub fn is_title_page<P: PageSource>(page: &P, descriptor: &ServiceDescriptor) -> bool {
    page.text()
        .lines()
        .take(TITLE_LINES)
        .any(|line| line.contains(descriptor.detection) && line.contains(RATES_WORD))
}

/// Locate one service, skipping pages already claimed.
///
/// Does not claim anything; see [`locate_services`] for the full pass.
pub fn locate_service<P: PageSource>(
    descriptor: &ServiceDescriptor,
    pages: &[P],
    claimed: &ClaimedPages,
) -> Option<PageSpan> {
    let last_page = pages.len().checked_sub(1)?;

    let start = pages
        .iter()
        .enumerate()
        .find(|(idx, page)| !claimed.is_claimed(*idx) && is_title_page(*page, descriptor))
        .map(|(idx, _)| idx)?;

    let end = start + descriptor.page_count.saturating_sub(1);
    if end > last_page {
        log::debug!(
            "{}: span end page {} is past the document end, clamping to {}",
            descriptor.name,
            end + 1,
            last_page + 1
        );
    }

    Some(PageSpan::new(start, end.min(last_page)))
}

/// Locate every catalog service in order, claiming spans as they are found.
///
/// Services that cannot be found are left out.
pub fn locate_services<P: PageSource>(
    catalog: &[ServiceDescriptor],
    pages: &[P],
) -> Vec<LocatedService> {
    let mut claimed = ClaimedPages::new();
    let mut located = Vec::new();

    for descriptor in catalog {
        match locate_service(descriptor, pages, &claimed) {
            Some(span) => {
                log::info!("Found {} on pages {}", descriptor.name, span);
                claimed.claim(span);
                located.push(LocatedService {
                    descriptor: *descriptor,
                    span,
                });
            }
            None => log::warn!("Could not find {}", descriptor.name),
        }
    }

    located
}
