//! Configuration module for Pymes-Scraper
//!
//! This module handles the optional TOML configuration file and the
//! validation of a crawl request coming from the command line.
//!
//! # Example
//!
//! ```no_run
//! use pymes_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pymes.toml")).unwrap();
//! println!("Writing rows to: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlRequest, HttpConfig, OutputConfig, SiteConfig, DEFAULT_ORIGIN};

// Re-export parser and validation functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, validate_request};
