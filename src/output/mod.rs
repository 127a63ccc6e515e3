//! Output module for crawl results
//!
//! This module handles:
//! - Streaming extracted records into the CSV file
//! - Recording crawl totals

mod csv_sink;
pub mod stats;

pub use csv_sink::CsvSink;
pub use stats::CrawlStats;
