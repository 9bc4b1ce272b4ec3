//! Stockwatch - stock and price watcher for e-commerce product pages
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::RunLoop;
pub use domain::history::HistoryManager;
pub use domain::price::PriceParser;
pub use domain::state::RunState;
pub use domain::transition::TransitionEngine;
pub use infrastructure::sites::SiteRegistry;
