//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for listing and detail pages
//! - Turning network failures and non-success statuses into errors
//!
//! There is no retry. Any failure here is a transport error and ends the
//! crawl.

use crate::config::{HttpConfig, SiteConfig};
use crate::extract::HtmlDocument;
use crate::PymesError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `site` - Site configuration, for the user agent
/// * `http` - Timeout configuration
///
/// # Example
///
/// ```no_run
/// use pymes_scraper::config::{HttpConfig, SiteConfig};
/// use pymes_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(site: &SiteConfig, http: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(site.user_agent.as_str())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages and parses them into documents
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns its raw body
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The response body of a 2xx response
    /// * `Err(PymesError::Http)` - Connection, timeout or body read failure
    /// * `Err(PymesError::HttpStatus)` - The server answered with a non-2xx status
    pub async fn fetch_body(&self, url: &str) -> Result<String, PymesError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| PymesError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PymesError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| PymesError::Http {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches `url` and parses the body as HTML
    pub async fn fetch_page(&self, url: &str) -> Result<HtmlDocument, PymesError> {
        let body = self.fetch_body(url).await?;
        Ok(HtmlDocument::parse(&body))
    }
}
