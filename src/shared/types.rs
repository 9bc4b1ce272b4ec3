//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One place a product can be bought
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteTarget {
    pub site: String,
    pub url: String,
    pub currency: String,
}

/// Catalog entry. Read-only to the monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub targets: Vec<SiteTarget>,
    /// Currency code -> highest acceptable price
    #[serde(default)]
    pub max_price: BTreeMap<String, f64>,
}

impl Product {
    /// Target price for the currency a site sells in, if one was configured.
    pub fn target_price(&self, currency: &str) -> Option<f64> {
        self.max_price.get(currency).copied()
    }
}

/// What a site extractor saw on a product page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub in_stock: bool,
    pub price: Option<f64>,
}

impl Observation {
    pub fn new(in_stock: bool, price: Option<f64>) -> Self {
        Self { in_stock, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_parsing() {
        let json = r#"{
            "id": "ps5",
            "name": "PlayStation 5",
            "targets": [
                { "site": "amazon", "url": "https://www.amazon.co.uk/dp/B0", "currency": "GBP" }
            ],
            "max_price": { "GBP": 400.0 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.targets.len(), 1);
        assert_eq!(product.target_price("GBP"), Some(400.0));
        assert_eq!(product.target_price("USD"), None);
    }

    #[test]
    fn test_max_price_is_optional() {
        let json = r#"{ "id": "x", "name": "X", "targets": [] }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.max_price.is_empty());
    }
}
