use chrono::{DateTime, Utc};

use crate::domain::state::PriceSample;
use crate::shared::utils::{format_price, format_short_date};

/// A target came back in stock at or under its target price
#[derive(Debug, Clone, PartialEq)]
pub struct StockEvent {
    pub product_name: String,
    pub site: String,
    pub price: f64,
    pub target_price: f64,
    pub currency: String,
    pub url: String,
    /// Most recent samples, oldest first
    pub recent_history: Vec<PriceSample>,
    pub timestamp: DateTime<Utc>,
}

impl StockEvent {
    /// One `date → price` line per recent sample
    pub fn history_lines(&self) -> String {
        if self.recent_history.is_empty() {
            return "No history yet".to_string();
        }
        self.recent_history
            .iter()
            .map(|s| format!("{} → {}", format_short_date(&s.date), format_price(s.price, &self.currency)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn plain_text(&self) -> String {
        format!(
            "{} in stock at {}: {} {:.2} {}",
            self.product_name, self.site, self.currency, self.price, self.url
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_event() -> StockEvent {
    use chrono::TimeZone;

    StockEvent {
        product_name: "Widget Pro".to_string(),
        site: "amazon".to_string(),
        price: 95.0,
        target_price: 100.0,
        currency: "GBP".to_string(),
        url: "https://example.com/widget".to_string(),
        recent_history: vec![
            PriceSample::new(120.0, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()),
            PriceSample::new(95.0, Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()),
        ],
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
    }
}
