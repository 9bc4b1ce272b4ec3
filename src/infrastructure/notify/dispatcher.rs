use async_trait::async_trait;
use tracing::{info, warn};

use super::event::StockEvent;
use super::traits::Notifier;
use crate::shared::errors::NotifyError;

/// Sends every event to every channel. Failures are logged, never returned.
#[derive(Default)]
pub struct NotificationDispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn add_channel(&mut self, channel: Box<dyn Notifier>) {
        self.channels.push(channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Returns how many channels accepted the event.
    pub async fn dispatch(&self, event: &StockEvent) -> usize {
        let mut delivered = 0;
        for channel in &self.channels {
            match channel.notify(event).await {
                Ok(()) => {
                    delivered += 1;
                    info!("📣 Notified {} via {}", event.product_name, channel.channel());
                }
                Err(e) => warn!("Notification via {} failed: {}", channel.channel(), e),
            }
        }
        delivered
    }
}

/// Channel that only writes the event to the log; used for dry runs
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, event: &StockEvent) -> Result<(), NotifyError> {
        info!("[dry-run] {}\n{}", event.plain_text(), event.history_lines());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notify::event::sample_event;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingChannel;

    #[async_trait]
    impl Notifier for FailingChannel {
        fn channel(&self) -> &'static str {
            "failing"
        }

        async fn notify(&self, _event: &StockEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected { channel: "failing", status: 500 })
        }
    }

    struct CountingChannel(Arc<AtomicUsize>);

    #[async_trait]
    impl Notifier for CountingChannel {
        fn channel(&self) -> &'static str {
            "counting"
        }

        async fn notify(&self, _event: &StockEvent) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_channel_does_not_block_others() {
        let count = Arc::new(AtomicUsize::new(0));
        let dispatcher = NotificationDispatcher::new(vec![
            Box::new(FailingChannel),
            Box::new(CountingChannel(Arc::clone(&count))),
        ]);

        let delivered = dispatcher.dispatch(&sample_event()).await;

        assert_eq!(delivered, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_channels() {
        let dispatcher = NotificationDispatcher::default();
        assert_eq!(dispatcher.dispatch(&sample_event()).await, 0);
    }
}
