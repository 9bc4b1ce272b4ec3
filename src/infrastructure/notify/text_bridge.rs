//! Plain-text channel for email/SMS bridges that accept a POSTed body

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request};
use std::time::Duration;

use super::event::StockEvent;
use super::traits::Notifier;
use crate::shared::errors::NotifyError;

const CHANNEL: &str = "text-bridge";

pub struct TextBridgeNotifier {
    client: Client,
    endpoint: String,
}

impl TextBridgeNotifier {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Request { channel: CHANNEL, message: e.to_string() })?;
        Ok(Self { client, endpoint })
    }

    fn build_request(&self, event: &StockEvent) -> Result<Request, NotifyError> {
        self.client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(event.plain_text())
            .build()
            .map_err(|e| NotifyError::Request { channel: CHANNEL, message: e.to_string() })
    }
}

#[async_trait]
impl Notifier for TextBridgeNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn notify(&self, event: &StockEvent) -> Result<(), NotifyError> {
        let request = self.build_request(event)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| NotifyError::Request { channel: CHANNEL, message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected { channel: CHANNEL, status: response.status().as_u16() });
        }
        Ok(())
    }
}
