use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::amazon::AmazonParser;
use super::selector_site::SelectorSite;
use super::traits::SiteParser;
use crate::config::SiteSelectorCfg;
use crate::infrastructure::http::PageFetcher;
use crate::shared::errors::ConfigError;

/// Registry of site extractors, keyed by lower-cased site id
#[derive(Default)]
pub struct SiteRegistry {
    parsers: HashMap<String, Arc<dyn SiteParser>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in extractors plus every selector site from configuration
    pub fn with_defaults(
        fetcher: Arc<PageFetcher>,
        selector_sites: &[SiteSelectorCfg],
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(Arc::new(AmazonParser::new(Arc::clone(&fetcher))));

        for cfg in selector_sites {
            registry.register(Arc::new(SelectorSite::new(cfg, Arc::clone(&fetcher))?));
        }

        info!("Registered sites: {}", registry.site_ids().join(", "));
        Ok(registry)
    }

    /// Add an extractor. A later registration replaces an earlier one with the same id.
    pub fn register(&mut self, parser: Arc<dyn SiteParser>) {
        let key = parser.site_id().to_lowercase();
        if self.parsers.insert(key.clone(), parser).is_some() {
            warn!("Site {} registered twice, keeping the latest", key);
        }
    }

    pub fn resolve(&self, site_id: &str) -> Option<Arc<dyn SiteParser>> {
        self.parsers.get(&site_id.to_lowercase()).cloned()
    }

    /// Sorted ids of every registered site
    pub fn site_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.parsers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fetcher() -> Arc<PageFetcher> {
        Arc::new(PageFetcher::new(Duration::from_secs(1), vec![]).unwrap())
    }

    #[test]
    fn test_defaults_include_amazon_and_configured_sites() {
        let sites = vec![SiteSelectorCfg {
            id: "Argos".to_string(),
            price_selector: ".price".to_string(),
            stock_selector: "button".to_string(),
            page_selector: None,
        }];
        let registry = SiteRegistry::with_defaults(fetcher(), &sites).unwrap();

        assert_eq!(registry.site_ids(), vec!["amazon".to_string(), "argos".to_string()]);
        assert!(registry.resolve("AMAZON").is_some());
        assert!(registry.resolve("argos").is_some());
    }

    #[test]
    fn test_unknown_site_resolves_to_none() {
        let registry = SiteRegistry::new();
        assert!(registry.resolve("ebay").is_none());
    }
}
