//! Service catalog and freight bracket configuration.

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// How a service prices its weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStructure {
    /// A price per discrete weight, with per-pound overage above the grid
    Flat,
    /// Per-pound bracket rates with a per-zone minimum charge
    Freight,
}

/// A static catalog entry describing where and how a service is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceDescriptor {
    /// Service name used in the output
    pub name: &'static str,
    /// Phrase that appears next to "Rates" in the service's title line
    pub detection: &'static str,
    /// Number of pages the service's rate tables occupy
    pub page_count: usize,
    /// Pricing structure
    pub structure: RateStructure,
}

impl ServiceDescriptor {
    /// A flat-rate service.
    pub const fn flat(name: &'static str, detection: &'static str, page_count: usize) -> Self {
        Self {
            name,
            detection,
            page_count,
            structure: RateStructure::Flat,
        }
    }

    /// A freight service.
    pub const fn freight(name: &'static str, detection: &'static str, page_count: usize) -> Self {
        Self {
            name,
            detection,
            page_count,
            structure: RateStructure::Freight,
        }
    }

    /// Check if the service uses freight pricing.
    pub fn is_freight(&self) -> bool {
        self.structure == RateStructure::Freight
    }
}

/// Services expected in a rate document, in detection order.
pub const SERVICE_CATALOG: &[ServiceDescriptor] = &[
    ServiceDescriptor::flat("FedEx First Overnight", "FedEx First Overnight", 4),
    ServiceDescriptor::flat("FedEx Priority Overnight", "FedEx Priority Overnight", 4),
    ServiceDescriptor::flat("FedEx Standard Overnight", "FedEx Standard Overnight", 4),
    ServiceDescriptor::flat("FedEx 2Day", "FedEx 2Day", 4),
    ServiceDescriptor::flat("FedEx Economy", "FedEx Economy", 4),
    ServiceDescriptor::freight("FedEx 1Day Freight", "FedEx 1Day", 2),
];

/// Weights listed in a flat-rate sheet.
pub const FLAT_WEIGHTS: RangeInclusive<u32> = 1..=150;

/// Weights read directly from flat-rate rows.
pub const PARSED_FLAT_WEIGHTS: RangeInclusive<u32> = 1..=99;

/// Weights priced from the per-pound overage rate.
pub const OVERAGE_WEIGHTS: RangeInclusive<u32> = 101..=150;

/// Weights listed in a freight sheet.
pub const FREIGHT_WEIGHTS: RangeInclusive<u32> = 151..=2000;

/// An inclusive page range, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PageSpan {
    /// First page index
    pub start: usize,
    /// Last page index
    pub end: usize,
}

impl PageSpan {
    /// Create a span; `end` is clamped to be at least `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Check whether a page index falls inside the span.
    pub fn contains(&self, page: usize) -> bool {
        self.start <= page && page <= self.end
    }

    /// Page indices in the span.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for PageSpan {
    /// Renders 1-indexed page numbers, as printed in the document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

/// A freight weight bracket sharing one per-pound rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeightBracket {
    /// Lowest weight in the bracket
    pub start: u32,
    /// Highest weight, `None` for open-ended
    pub end: Option<u32>,
}

impl WeightBracket {
    /// A closed bracket.
    pub const fn bounded(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// An open-ended bracket.
    pub const fn open(start: u32) -> Self {
        Self { start, end: None }
    }

    /// Check whether a weight falls in the bracket.
    pub fn contains(&self, weight: u32) -> bool {
        weight >= self.start && self.end.map_or(true, |end| weight <= end)
    }

    /// The freight bracket for a weight.
    pub fn for_weight(weight: u32) -> Option<WeightBracket> {
        FREIGHT_BRACKETS.iter().copied().find(|b| b.contains(weight))
    }
}

impl fmt::Display for WeightBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{} lbs", self.start, end),
            None => write!(f, "{}+ lbs", self.start),
        }
    }
}

/// Freight brackets in ascending order.
pub const FREIGHT_BRACKETS: [WeightBracket; 5] = [
    WeightBracket::bounded(151, 299),
    WeightBracket::bounded(300, 499),
    WeightBracket::bounded(500, 999),
    WeightBracket::bounded(1000, 1999),
    WeightBracket::open(2000),
];

/// A label phrase identifying a freight bracket row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPhrase {
    /// Phrase as printed
    pub phrase: &'static str,
    /// Bracket it names
    pub bracket: WeightBracket,
}

/// Bracket row phrases. Two spellings map to 1000-1999 because some
/// documents drop the space before the upper bound.
pub const BRACKET_PHRASES: [BracketPhrase; 6] = [
    BracketPhrase {
        phrase: "151 to 299",
        bracket: FREIGHT_BRACKETS[0],
    },
    BracketPhrase {
        phrase: "300 to 499",
        bracket: FREIGHT_BRACKETS[1],
    },
    BracketPhrase {
        phrase: "500 to 999",
        bracket: FREIGHT_BRACKETS[2],
    },
    BracketPhrase {
        phrase: "1000 to 1999",
        bracket: FREIGHT_BRACKETS[3],
    },
    BracketPhrase {
        phrase: "1000 to1999",
        bracket: FREIGHT_BRACKETS[3],
    },
    BracketPhrase {
        phrase: "2000 or more",
        bracket: FREIGHT_BRACKETS[4],
    },
];
