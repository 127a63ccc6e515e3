use crate::config::types::{Config, CrawlRequest, HttpConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates a crawl request
///
/// Runs before any file is created or any request is sent.
pub fn validate_request(request: &CrawlRequest) -> Result<(), ConfigError> {
    let municipality = &request.municipality;

    if municipality.is_empty() {
        return Err(ConfigError::Validation(
            "municipality cannot be empty".to_string(),
        ));
    }

    if municipality
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '&')
    {
        return Err(ConfigError::Validation(format!(
            "municipality must be a URL slug such as 'xalapa-65eb', got '{}'",
            municipality
        )));
    }

    if request.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start page must be >= 1, got {}",
            request.start_page
        )));
    }

    if request.start_page > request.end_page {
        return Err(ConfigError::Validation(format!(
            "start page ({}) must not be greater than end page ({})",
            request.start_page, request.end_page
        )));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if origin.scheme() != "http" && origin.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use http or https",
            config.origin
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path == config.log_path {
        return Err(ConfigError::Validation(format!(
            "csv_path and log_path must differ, both are '{}'",
            config.csv_path
        )));
    }

    Ok(())
}
