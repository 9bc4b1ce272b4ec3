//! Error handling for the application

use thiserror::Error;

/// Site extraction errors. Any of these means "no observation this run".
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Site not supported: {0}")]
    UnknownSite(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unexpected page markup: {0}")]
    UnexpectedMarkup(String),
}

impl From<reqwest::Error> for SiteError {
    fn from(err: reqwest::Error) -> Self {
        SiteError::Transport(err.to_string())
    }
}

/// Notification channel errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Channel {channel} request failed: {message}")]
    Request { channel: &'static str, message: String },

    #[error("Channel {channel} rejected message with status {status}")]
    Rejected { channel: &'static str, status: u16 },
}

/// State document errors
#[derive(Error, Debug)]
pub enum StateError {
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Product catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {0} contains no products")]
    Empty(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
