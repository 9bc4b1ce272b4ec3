//! Persisted monitoring state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observed price. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PriceSample {
    pub fn new(price: f64, date: DateTime<Utc>) -> Self {
        Self { price, date }
    }
}

/// State of one (product, site) target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    pub in_stock: bool,
    /// Chronological, oldest first
    #[serde(default)]
    pub prices: Vec<PriceSample>,
}

/// The whole document carried from one run to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<DateTime<Utc>>,
    /// product id -> site id -> state
    #[serde(default)]
    pub products: BTreeMap<String, BTreeMap<String, MonitorState>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product_id: &str, site: &str) -> Option<&MonitorState> {
        self.products.get(product_id).and_then(|sites| sites.get(site))
    }

    /// State for a target, created out of stock with empty history on first use.
    pub fn entry(&mut self, product_id: &str, site: &str) -> &mut MonitorState {
        self.products
            .entry(product_id.to_string())
            .or_default()
            .entry(site.to_string())
            .or_default()
    }

    pub fn set(&mut self, product_id: &str, site: &str, state: MonitorState) {
        *self.entry(product_id, site) = state;
    }

    /// Every stored target, for sweeps that touch all histories.
    pub fn targets_mut(&mut self) -> impl Iterator<Item = &mut MonitorState> {
        self.products.values_mut().flat_map(|sites| sites.values_mut())
    }

    pub fn target_count(&self) -> usize {
        self.products.values().map(|sites| sites.len()).sum()
    }

    /// Move `last_reset` to `now`, never backwards.
    pub fn mark_reset(&mut self, now: DateTime<Utc>) {
        self.last_reset = Some(match self.last_reset {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}
