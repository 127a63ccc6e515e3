//! Crawler module for page fetching and crawl coordination
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching of listing and detail pages
//! - The page-by-page, listing-by-listing crawl loop

mod coordinator;
mod fetcher;

pub use coordinator::{listing_page_url, run_crawl, Coordinator};
pub use fetcher::{build_http_client, Fetcher};
