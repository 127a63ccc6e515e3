//! Crawl statistics
//!
//! Running totals kept by the coordinator and reported when a crawl ends.

/// Totals for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages fetched
    pub pages_fetched: u32,

    /// Detail page URLs found on listing pages and visited
    pub listings_seen: u64,

    /// Rows written to the CSV file
    pub records_written: u64,

    /// Businesses without an address block
    pub no_data: u64,

    /// Detail pages whose structure could not be mapped
    pub malformed: u64,

    /// Detail pages that answered with a non-success status
    pub unavailable: u64,
}

impl CrawlStats {
    /// Listings that produced no row
    pub fn skipped(&self) -> u64 {
        self.no_data + self.malformed + self.unavailable
    }

    /// Formats the totals as a single line
    pub fn format_summary(&self) -> String {
        format!(
            "{} pages, {} listings, {} records written, {} without address, {} malformed, {} unavailable",
            self.pages_fetched,
            self.listings_seen,
            self.records_written,
            self.no_data,
            self.malformed,
            self.unavailable
        )
    }

    /// Logs the totals, pointing at the log file if anything was skipped
    pub fn log_summary(&self, log_path: &str) {
        tracing::info!("Summary: {}", self.format_summary());

        if self.skipped() > 0 {
            tracing::info!("{} listings skipped, see {} for details", self.skipped(), log_path);
        }
    }
}
