//! Price domain - normalization of scraped price text

mod price_parser;

pub use price_parser::{ParsedPrice, PriceParser};
