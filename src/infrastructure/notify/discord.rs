//! Discord webhook channel

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::event::StockEvent;
use super::traits::Notifier;
use crate::shared::errors::NotifyError;
use crate::shared::utils::{format_price, truncate_chars};

const CHANNEL: &str = "discord";
const EMBED_COLOR: u32 = 3066993;

pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
    /// Embed field values are capped by Discord
    field_limit: usize,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String, field_limit: usize, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Request { channel: CHANNEL, message: e.to_string() })?;
        Ok(Self { client, webhook_url, field_limit })
    }

    pub fn build_payload(event: &StockEvent, field_limit: usize) -> Value {
        let history = event.history_lines();
        json!({
            "embeds": [{
                "title": format!("🛒 {} AVAILABLE", event.product_name),
                "description": format!("[Buy Link]({})", event.url),
                "color": EMBED_COLOR,
                "fields": [
                    { "name": "Current Price", "value": format_price(event.price, &event.currency), "inline": true },
                    { "name": "Target Price", "value": format_price(event.target_price, &event.currency), "inline": true },
                    { "name": "Site", "value": event.site, "inline": true },
                    { "name": "Price History", "value": truncate_chars(&history, field_limit), "inline": false }
                ],
                "timestamp": event.timestamp.to_rfc3339()
            }]
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn notify(&self, event: &StockEvent) -> Result<(), NotifyError> {
        let payload = Self::build_payload(event, self.field_limit);
        debug!("Posting embed for {} to Discord", event.product_name);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Request { channel: CHANNEL, message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected { channel: CHANNEL, status: response.status().as_u16() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notify::event::sample_event;

    #[test]
    fn test_embed_layout() {
        let payload = DiscordNotifier::build_payload(&sample_event(), 1024);
        let embed = &payload["embeds"][0];

        assert_eq!(embed["title"], "🛒 Widget Pro AVAILABLE");
        assert_eq!(embed["description"], "[Buy Link](https://example.com/widget)");
        assert_eq!(embed["color"], 3066993);
        assert_eq!(embed["fields"][0]["value"], "£95.00");
        assert_eq!(embed["fields"][1]["value"], "£100.00");
        assert_eq!(embed["fields"][3]["inline"], false);
        assert_eq!(embed["timestamp"], "2024-01-01T09:30:00+00:00");
    }

    #[test]
    fn test_history_field_truncated() {
        let payload = DiscordNotifier::build_payload(&sample_event(), 10);
        let history = payload["embeds"][0]["fields"][3]["value"].as_str().unwrap();
        assert_eq!(history.chars().count(), 10);
        assert_eq!(history, "2024-01-01");
    }
}
