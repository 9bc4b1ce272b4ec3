use async_trait::async_trait;

use super::event::StockEvent;
use crate::shared::errors::NotifyError;

/// Outbound notification channel. Delivery is best effort.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;

    async fn notify(&self, event: &StockEvent) -> Result<(), NotifyError>;
}
