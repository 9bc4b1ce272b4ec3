//! Amazon product page extractor

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use tracing::debug;

use super::traits::SiteParser;
use crate::domain::price::PriceParser;
use crate::infrastructure::http::PageFetcher;
use crate::shared::errors::SiteError;
use crate::shared::types::Observation;

pub const SITE_ID: &str = "amazon";

/// Present on real product pages, absent on robot checks.
static PRODUCT_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#productTitle").unwrap());

/// Screen-reader copy of the full price, e.g. "£1,299.99".
static PRICE_OFFSCREEN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.a-offscreen").unwrap());

static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".a-price .a-price-whole").unwrap());

static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".a-price .a-price-fraction").unwrap());

static ADD_TO_CART: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#add-to-cart-button").unwrap());

pub struct AmazonParser {
    fetcher: Arc<PageFetcher>,
}

impl AmazonParser {
    pub fn new(fetcher: Arc<PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Read an already fetched product page
    pub fn parse_page(html: &str) -> Result<Observation, SiteError> {
        let document = Html::parse_document(html);

        if document.select(&PRODUCT_TITLE).next().is_none() {
            return Err(SiteError::UnexpectedMarkup(
                "no #productTitle (robot check or layout change)".to_string(),
            ));
        }

        let in_stock = document.select(&ADD_TO_CART).next().is_some();
        let price = Self::read_price(&document);
        if price.is_none() {
            debug!("No parseable price on page");
        }

        Ok(Observation::new(in_stock, price))
    }

    fn read_price(document: &Html) -> Option<f64> {
        let offscreen = document
            .select(&PRICE_OFFSCREEN)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|text| PriceParser::normalize(&text).amount());
        if offscreen.is_some() {
            return offscreen;
        }

        let whole = document.select(&PRICE_WHOLE).next()?.text().collect::<String>();
        let fraction = document
            .select(&PRICE_FRACTION)
            .next()
            .map(|el| el.text().collect::<String>());
        PriceParser::normalize_parts(&whole, fraction.as_deref()).amount()
    }
}

#[async_trait]
impl SiteParser for AmazonParser {
    fn site_id(&self) -> &str {
        SITE_ID
    }

    async fn extract(&self, url: &str) -> Result<Observation, SiteError> {
        let body = self.fetcher.fetch(url).await?;
        Self::parse_page(&body)
    }
}
