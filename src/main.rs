//! Pymes-Scraper main entry point
//!
//! This is the command-line interface for the Pymes-Scraper address extractor.

use clap::Parser;
use pymes_scraper::config::{load_config_or_default, validate_request, CrawlRequest};
use pymes_scraper::crawler::run_crawl;
use pymes_scraper::logging::setup_logging;
use std::path::{Path, PathBuf};

/// Pymes-Scraper: download business names and addresses from pymes.org.mx
///
/// The municipality must be given the way the site spells it in its URLs
/// (Xalapa is `xalapa-65eb`). Open https://pymes.org.mx/site/municipios.html,
/// pick a municipality and read the name before `.html` in the address bar;
/// the pagination at the bottom of that page shows the valid page numbers.
#[derive(Parser, Debug)]
#[command(name = "pymes-scraper")]
#[command(version)]
#[command(about = "Download business addresses from pymes.org.mx", long_about = None)]
struct Cli {
    /// Municipality slug as used by the site (e.g. xalapa-65eb)
    #[arg(value_name = "MUNICIPALITY")]
    municipality: String,

    /// First listing page to download
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    start: u32,

    /// Last listing page to download
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    end: u32,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reject a bad range before any file is created or request sent
    let request = CrawlRequest::new(cli.municipality, cli.start, cli.end);
    validate_request(&request)?;

    let config = load_config_or_default(cli.config.as_deref())?;

    setup_logging(cli.verbose, cli.quiet, Path::new(&config.output.log_path))?;

    tracing::info!(
        "Writing {} (log: {})",
        config.output.csv_path,
        config.output.log_path
    );

    match run_crawl(&config, &request).await {
        Ok(stats) => {
            stats.log_summary(&config.output.log_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
