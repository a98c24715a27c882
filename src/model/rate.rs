//! Rate table types.

use super::{PageSpan, RateStructure};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A money amount. Exact decimal, two fraction digits.
pub type Money = Decimal;

/// Lowest distance zone column.
pub const MIN_ZONE: u8 = 1;

/// Highest distance zone column.
pub const MAX_ZONE: u8 = 16;

/// Price grid: weight (lbs) to zone to amount.
///
/// Weights with no zone entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<u32, BTreeMap<u8, Money>>,
}

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the amount for a cell, returning the previous amount.
    pub fn insert(&mut self, weight: u32, zone: u8, amount: Money) -> Option<Money> {
        self.rates.entry(weight).or_default().insert(zone, amount)
    }

    /// Set the amount for a cell only if it holds nothing yet.
    ///
    /// Returns `true` if the amount was stored.
    pub fn insert_if_absent(&mut self, weight: u32, zone: u8, amount: Money) -> bool {
        let zones = self.rates.entry(weight).or_default();
        if zones.contains_key(&zone) {
            return false;
        }
        zones.insert(zone, amount);
        true
    }

    /// Amount for a cell.
    pub fn get(&self, weight: u32, zone: u8) -> Option<Money> {
        self.rates.get(&weight).and_then(|z| z.get(&zone)).copied()
    }

    /// All zone amounts for a weight.
    pub fn zones(&self, weight: u32) -> Option<&BTreeMap<u8, Money>> {
        self.rates.get(&weight)
    }

    /// Check whether a cell holds an amount.
    pub fn contains(&self, weight: u32, zone: u8) -> bool {
        self.get(weight, zone).is_some()
    }

    /// Stored weights in ascending order.
    pub fn weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.keys().copied()
    }

    /// Iterate rows in ascending weight order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BTreeMap<u8, Money>)> {
        self.rates.iter().map(|(w, z)| (*w, z))
    }

    /// Number of stored weights.
    pub fn weight_count(&self) -> usize {
        self.rates.len()
    }

    /// Number of stored amounts.
    pub fn value_count(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Check if the table holds no amounts.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// The rate table of one detected service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRates {
    /// Service name
    pub name: String,

    /// Whether the service uses freight pricing
    pub is_freight: bool,

    /// Pages the service was read from
    pub pages: PageSpan,

    /// Price grid
    pub rates: RateTable,
}

impl ServiceRates {
    /// Create a service result.
    pub fn new(
        name: impl Into<String>,
        structure: RateStructure,
        pages: PageSpan,
        rates: RateTable,
    ) -> Self {
        Self {
            name: name.into(),
            is_freight: structure == RateStructure::Freight,
            pages,
            rates,
        }
    }
}
