//! Product catalog loading

use std::fs;
use std::path::Path;
use tracing::info;

use crate::shared::errors::CatalogError;
use crate::shared::types::Product;

pub struct ProductCatalog;

impl ProductCatalog {
    /// Load the JSON product list. Any failure here is fatal for the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, CatalogError> {
        let shown = path.as_ref().display().to_string();

        let content = fs::read_to_string(path.as_ref()).map_err(|source| CatalogError::Read {
            path: shown.clone(),
            source,
        })?;
        let products: Vec<Product> = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: shown.clone(),
            source,
        })?;

        if products.is_empty() {
            return Err(CatalogError::Empty(shown));
        }

        let targets: usize = products.iter().map(|p| p.targets.len()).sum();
        info!("Loaded {} products ({} site targets) from {}", products.len(), targets, shown);
        Ok(products)
    }
}
