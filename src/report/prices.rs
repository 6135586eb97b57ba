use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Point-in-time mapping from instrument label to unit price.
///
/// Built by the market-data collaborator once per refresh cycle and
/// treated as a read-only snapshot for the duration of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, price: f64) {
        self.prices.insert(name.into(), price);
    }

    /// Unit price for an instrument, or the `0.0` sentinel when the
    /// instrument is absent from the table.
    ///
    /// The sentinel is deliberately overloaded with "price truly zero";
    /// the valuation pipeline treats any non-positive resolved price as
    /// price-unknown and reads the record's amount as a direct currency
    /// value instead.
    pub fn resolve(&self, name: &str) -> f64 {
        self.prices.get(name).copied().unwrap_or(0.0)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.prices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Labels in deterministic order, for rendering.
    pub fn sorted_entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .prices
            .iter()
            .map(|(name, price)| (name.as_str(), *price))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
