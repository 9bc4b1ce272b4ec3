//! Extractor for sites described in configuration by CSS selectors

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

use super::traits::SiteParser;
use crate::config::SiteSelectorCfg;
use crate::domain::price::PriceParser;
use crate::infrastructure::http::PageFetcher;
use crate::shared::errors::{ConfigError, SiteError};
use crate::shared::types::Observation;

pub struct SelectorSite {
    id: String,
    price: Selector,
    stock: Selector,
    page: Option<Selector>,
    fetcher: Arc<PageFetcher>,
}

impl SelectorSite {
    pub fn new(cfg: &SiteSelectorCfg, fetcher: Arc<PageFetcher>) -> Result<Self, ConfigError> {
        Ok(Self {
            id: cfg.id.clone(),
            price: compile(&cfg.id, "price_selector", &cfg.price_selector)?,
            stock: compile(&cfg.id, "stock_selector", &cfg.stock_selector)?,
            page: cfg
                .page_selector
                .as_deref()
                .map(|s| compile(&cfg.id, "page_selector", s))
                .transpose()?,
            fetcher,
        })
    }

    pub fn parse_page(&self, html: &str) -> Result<Observation, SiteError> {
        let document = Html::parse_document(html);

        if let Some(page) = &self.page {
            if document.select(page).next().is_none() {
                return Err(SiteError::UnexpectedMarkup(format!(
                    "{}: page selector did not match",
                    self.id
                )));
            }
        }

        let in_stock = document.select(&self.stock).next().is_some();
        let price = document
            .select(&self.price)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|text| PriceParser::normalize(&text).amount());

        Ok(Observation::new(in_stock, price))
    }
}

fn compile(site: &str, field: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Invalid(format!("site {}: bad {} {:?}: {}", site, field, selector, e))
    })
}

#[async_trait]
impl SiteParser for SelectorSite {
    fn site_id(&self) -> &str {
        &self.id
    }

    async fn extract(&self, url: &str) -> Result<Observation, SiteError> {
        let body = self.fetcher.fetch(url).await?;
        self.parse_page(&body)
    }
}
