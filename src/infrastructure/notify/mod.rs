pub mod discord;
pub mod dispatcher;
pub mod event;
pub mod text_bridge;
pub mod traits;

pub use discord::DiscordNotifier;
pub use dispatcher::{LogNotifier, NotificationDispatcher};
pub use event::StockEvent;
pub use text_bridge::TextBridgeNotifier;
pub use traits::Notifier;
