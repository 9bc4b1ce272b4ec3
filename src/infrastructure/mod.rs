//! Infrastructure layer - HTTP, site extractors, notification channels, files

pub mod http;
pub mod notify;
pub mod sites;
pub mod storage;
