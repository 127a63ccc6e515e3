//! Extraction module for listing and detail pages
//!
//! This module turns fetched HTML into data:
//! - Detail page URLs from a municipality listing page
//! - Business name and address from a detail page
//! - Fragment clean-up shared by both

mod detail;
mod document;
mod listing;
mod normalize;
mod record;

pub use detail::{
    extract_address, map_fragments, FieldLayout, ADDRESS_BLOCK_INDEX, FULL_LAYOUT,
    FULL_LAYOUT_LEN, REDUCED_LAYOUT,
};
pub use document::{find_all_within, stripped_strings, text_of, HtmlDocument};
pub use listing::extract_listing_urls;
pub use normalize::normalize;
pub use record::AddressRecord;

use thiserror::Error;

/// Reasons a detail page yields no record
///
/// None of these stop a crawl; the coordinator logs them and moves on to
/// the next listing.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Business {name} has no address information")]
    NoData { name: String },

    #[error("Detail page has no business name element")]
    MissingName,

    #[error("Address block of {name} has {len} fragments, field index {index} is out of range")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
}

impl ExtractError {
    /// Returns true for the expected "business has no address" case
    pub fn is_no_data(&self) -> bool {
        matches!(self, ExtractError::NoData { .. })
    }
}
