pub mod amazon;
pub mod registry;
pub mod selector_site;
pub mod traits;

pub use amazon::AmazonParser;
pub use registry::SiteRegistry;
pub use selector_site::SelectorSite;
pub use traits::SiteParser;
