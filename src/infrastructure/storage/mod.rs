pub mod catalog;
pub mod state_store;

pub use catalog::ProductCatalog;
pub use state_store::StateStore;
