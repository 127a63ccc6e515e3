use serde::Deserialize;

/// Default site origin
pub const DEFAULT_ORIGIN: &str = "https://pymes.org.mx";

/// Main configuration structure for Pymes-Scraper
///
/// Every section and key is optional; missing values fall back to the
/// defaults below, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin that listing URLs are built on and detail links resolve against
    #[serde(default = "default_origin")]
    pub origin: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file, truncated on every run
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the warning/error log, truncated on every run
    #[serde(rename = "log-path", default = "default_log_path")]
    pub log_path: String,
}

/// One crawl invocation: a municipality and an inclusive page range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Municipality slug as the site spells it (e.g. `xalapa-65eb`)
    pub municipality: String,

    /// First listing page, 1-based
    pub start_page: u32,

    /// Last listing page, inclusive
    pub end_page: u32,
}

impl CrawlRequest {
    pub fn new(municipality: impl Into<String>, start_page: u32, end_page: u32) -> Self {
        Self {
            municipality: municipality.into(),
            start_page,
            end_page,
        }
    }

    /// Number of listing pages this request covers
    pub fn page_count(&self) -> u32 {
        self.end_page.saturating_add(1).saturating_sub(self.start_page)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            log_path: default_log_path(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_user_agent() -> String {
    format!("pymes-scraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_csv_path() -> String {
    "empresas.csv".to_string()
}

fn default_log_path() -> String {
    "download.log".to_string()
}
