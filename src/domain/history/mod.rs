//! History domain - bounded price history

mod history_manager;

pub use history_manager::HistoryManager;
