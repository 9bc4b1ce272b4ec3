use async_trait::async_trait;

use crate::shared::errors::SiteError;
use crate::shared::types::Observation;

/// Trait for site-specific extractors
/// Each implementation knows how to read stock and price from one site's pages
#[async_trait]
pub trait SiteParser: Send + Sync {
    /// Identifier used in the catalog's `site` field
    fn site_id(&self) -> &str;

    /// Fetch a product page and read stock/price from it.
    ///
    /// An `Err` means the page could not be trusted; callers must not treat it
    /// as an out-of-stock observation.
    async fn extract(&self, url: &str) -> Result<Observation, SiteError>;
}
