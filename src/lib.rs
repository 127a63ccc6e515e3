//! Pymes-Scraper: a business-directory address extractor
//!
//! This crate walks the paginated municipality listings of a business
//! directory, visits every listed business, extracts its postal address
//! from the detail page and streams the results into a CSV file.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod logging;
pub mod output;

use thiserror::Error;

/// Main error type for Pymes-Scraper operations
///
/// `Http` and `HttpStatus` are transport failures. `Http` always ends the
/// crawl; `HttpStatus` ends it for listing pages, while a detail page with
/// a non-success status is logged and skipped.
#[derive(Debug, Error)]
pub enum PymesError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl PymesError {
    /// Returns true if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, PymesError::Http { .. } | PymesError::HttpStatus { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Pymes-Scraper operations
pub type Result<T> = std::result::Result<T, PymesError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlRequest};
pub use crawler::run_crawl;
pub use extract::{AddressRecord, ExtractError};
pub use output::CrawlStats;
