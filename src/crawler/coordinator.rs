//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop. For every page number in the
//! requested range it:
//! - Fetches the municipality listing page
//! - Collects the detail page URLs it links to
//! - Fetches each detail page and extracts its address
//! - Streams every extracted record to the CSV sink
//!
//! Extraction failures and non-success detail pages are logged and skipped.
//! Listing page failures and connection failures abort the crawl.

use crate::config::{validate, validate_request, Config, CrawlRequest};
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::extract::{extract_address, extract_listing_urls, ExtractError};
use crate::output::{CrawlStats, CsvSink};
use crate::PymesError;
use std::io::Write;
use std::path::Path;
use url::Url;

/// Builds the URL of one municipality listing page
///
/// # Example
///
/// ```
/// use pymes_scraper::crawler::listing_page_url;
/// use url::Url;
///
/// let origin = Url::parse("https://pymes.org.mx").unwrap();
/// assert_eq!(
///     listing_page_url(&origin, "xalapa-65eb", 3),
///     "https://pymes.org.mx/municipio/xalapa-65eb.html?Pyme_page=3&municipio%2Fxalapa-65eb_html="
/// );
/// ```
pub fn listing_page_url(origin: &Url, municipality: &str, page: u32) -> String {
    format!(
        "{}/municipio/{}.html?Pyme_page={}&municipio%2F{}_html=",
        origin.as_str().trim_end_matches('/'),
        municipality,
        page,
        municipality
    )
}

/// Main crawler coordinator structure
///
/// Owns the HTTP fetcher, the output sink and the running totals. The page
/// and listing cursors live in [`Coordinator::run`].
pub struct Coordinator<W: Write> {
    fetcher: Fetcher,
    origin: Url,
    sink: CsvSink<W>,
    stats: CrawlStats,
}

impl<W: Write> Coordinator<W> {
    /// Creates a new coordinator writing into `sink`
    ///
    /// The sink is expected to have its header written already.
    pub fn new(config: &Config, sink: CsvSink<W>) -> Result<Self, PymesError> {
        let origin = Url::parse(&config.site.origin)?;
        let client = build_http_client(&config.site, &config.http)?;

        Ok(Self {
            fetcher: Fetcher::new(client),
            origin,
            sink,
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl over every page of `request`, in ascending order
    ///
    /// Returns the first listing page, connection or output error. Records
    /// written before the error stay in the sink.
    pub async fn run(&mut self, request: &CrawlRequest) -> Result<(), PymesError> {
        let total_pages = request.page_count();
        tracing::info!(
            "Crawling {} pages {}-{} ({} pages)",
            request.municipality,
            request.start_page,
            request.end_page,
            total_pages
        );

        for (position, page) in (request.start_page..=request.end_page).enumerate() {
            tracing::info!("Page {}/{} (page {})", position + 1, total_pages, page);
            self.crawl_page(&request.municipality, page).await?;
        }

        tracing::info!(
            "Crawl completed: {} records written from {} listings",
            self.stats.records_written,
            self.stats.listings_seen
        );

        Ok(())
    }

    /// Crawls one listing page and every detail page it links to
    async fn crawl_page(&mut self, municipality: &str, page: u32) -> Result<(), PymesError> {
        let url = listing_page_url(&self.origin, municipality, page);

        let listing_urls = {
            let document = self.fetcher.fetch_page(&url).await?;
            extract_listing_urls(&document, &self.origin)
        };
        self.stats.pages_fetched += 1;

        if listing_urls.is_empty() {
            tracing::info!("No listings found on {}", url);
            return Ok(());
        }

        let total = listing_urls.len();
        for (index, detail_url) in listing_urls.iter().enumerate() {
            tracing::debug!("Listing {}/{}: {}", index + 1, total, detail_url);
            self.process_listing(detail_url).await?;
        }

        Ok(())
    }

    /// Fetches one detail page and writes its record if it has one
    async fn process_listing(&mut self, url: &str) -> Result<(), PymesError> {
        self.stats.listings_seen += 1;

        // A dead detail link only loses that business; connection failures
        // still end the crawl
        let document = match self.fetcher.fetch_page(url).await {
            Ok(document) => document,
            Err(PymesError::HttpStatus { status, .. }) => {
                tracing::warn!("Detail page {} answered HTTP {}, skipping", url, status);
                self.stats.unavailable += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match extract_address(&document) {
            Ok(record) => {
                self.sink.write_record(&record)?;
                self.stats.records_written += 1;
            }
            Err(e @ ExtractError::NoData { .. }) => {
                tracing::warn!("{}", e);
                self.stats.no_data += 1;
            }
            Err(e) => {
                tracing::error!("Malformed detail page {}: {}", url, e);
                self.stats.malformed += 1;
            }
        }

        Ok(())
    }

    /// Flushes the sink and returns the totals
    pub fn finish(self) -> Result<CrawlStats, PymesError> {
        self.sink.finish()?;
        Ok(self.stats)
    }
}

/// Runs a complete crawl operation
///
/// This function:
///
/// 1. Validates the request and configuration, before touching any file
/// 2. Truncates the CSV file and writes its header
/// 3. Crawls every requested page
/// 4. Flushes the CSV file, on success and on failure
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed; per-business problems are counted
/// * `Err(PymesError)` - Invalid request, transport failure or output failure
///
/// # Example
///
/// ```no_run
/// use pymes_scraper::config::{Config, CrawlRequest};
/// use pymes_scraper::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = CrawlRequest::new("xalapa-65eb", 1, 3);
/// let stats = run_crawl(&Config::default(), &request).await?;
/// println!("{} records", stats.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, request: &CrawlRequest) -> Result<CrawlStats, PymesError> {
    validate_request(request)?;
    validate(config)?;

    let sink = CsvSink::create(Path::new(&config.output.csv_path))?;
    let mut coordinator = Coordinator::new(config, sink)?;

    let outcome = coordinator.run(request).await;
    let finished = coordinator.finish();
    outcome?;
    finished
}
