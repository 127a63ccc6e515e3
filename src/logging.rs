//! Logging setup
//!
//! Two outputs: the console, filtered by the verbosity flags, and the
//! download log, which receives every warning and error of a run.

use crate::PymesError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Console filter for the given verbosity flags
pub fn console_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pymes_scraper=info,warn"),
            1 => EnvFilter::new("pymes_scraper=debug,info"),
            2 => EnvFilter::new("pymes_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Layer writing warnings and errors to `log_path`
///
/// The file is truncated when the layer is built.
pub fn file_layer<S>(log_path: &Path) -> Result<Box<dyn Layer<S> + Send + Sync + 'static>, PymesError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let log_file = File::create(log_path)?;

    Ok(fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::WARN)
        .boxed())
}

/// Installs the global subscriber: console on stderr plus the download log
pub fn setup_logging(verbose: u8, quiet: bool, log_path: &Path) -> Result<(), PymesError> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_filter(console_filter(verbose, quiet));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer(log_path)?)
        .init();

    Ok(())
}
