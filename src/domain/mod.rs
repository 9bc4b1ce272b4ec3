//! Domain layer - core monitoring logic and entities

pub mod history;
pub mod price;
pub mod state;
pub mod transition;
