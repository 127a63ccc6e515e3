//! Detail page field extraction
//!
//! A detail page names the business in a `<span itemprop="name">` and
//! lists its address as loose text inside the second `icon-box-body` block.
//! The text fragments are positional: the block either has the full layout
//! of 15 fragments, or it omits the street number and every later field
//! shifts one place to the left.

use crate::extract::document::{stripped_strings, text_of, HtmlDocument};
use crate::extract::normalize::normalize;
use crate::extract::record::AddressRecord;
use crate::extract::ExtractError;

const NAME_SELECTOR: &str = r#"span[itemprop="name"]"#;
const INFO_BLOCK_SELECTOR: &str = "div.icon-box-body";

/// Position of the address block among the info blocks
pub const ADDRESS_BLOCK_INDEX: usize = 1;

/// Fragment count of a block that includes the street number
pub const FULL_LAYOUT_LEN: usize = 15;

/// Fragment positions of each address field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub street: usize,
    /// `None` when the layout has no street number
    pub number: Option<usize>,
    pub block: usize,
    pub city: usize,
    pub state: usize,
    pub country: usize,
    pub postal_code: usize,
}

/// Layout with a street number
pub const FULL_LAYOUT: FieldLayout = FieldLayout {
    street: 0,
    number: Some(1),
    block: 2,
    city: 3,
    state: 6,
    country: 8,
    postal_code: 10,
};

/// Layout without a street number
pub const REDUCED_LAYOUT: FieldLayout = FieldLayout {
    street: 0,
    number: None,
    block: 1,
    city: 2,
    state: 5,
    country: 7,
    postal_code: 9,
};

impl FieldLayout {
    /// Picks the layout for a block with `len` fragments
    pub fn for_len(len: usize) -> Self {
        if len == FULL_LAYOUT_LEN {
            FULL_LAYOUT
        } else {
            REDUCED_LAYOUT
        }
    }
}

/// Extracts the business name and address from a detail page
///
/// # Returns
///
/// * `Ok(AddressRecord)` - The page had a usable address block
/// * `Err(ExtractError::NoData)` - The page has no address block
/// * `Err(ExtractError::MissingName)` - The page has no name element
/// * `Err(ExtractError::IndexOutOfRange)` - The address block is too short
pub fn extract_address(document: &HtmlDocument) -> Result<AddressRecord, ExtractError> {
    let name = document
        .find_first(NAME_SELECTOR)
        .map(|element| text_of(element).trim().to_string())
        .ok_or(ExtractError::MissingName)?;

    let blocks = document.find_all(INFO_BLOCK_SELECTOR);
    let Some(address_block) = blocks.get(ADDRESS_BLOCK_INDEX) else {
        return Err(ExtractError::NoData { name });
    };

    let fragments = stripped_strings(*address_block);
    map_fragments(name, &fragments)
}

/// Maps address block fragments onto the record fields
pub fn map_fragments(name: String, fragments: &[String]) -> Result<AddressRecord, ExtractError> {
    let layout = FieldLayout::for_len(fragments.len());

    let pick = |index: usize| -> Result<String, ExtractError> {
        fragments
            .get(index)
            .map(|fragment| normalize(fragment))
            .ok_or_else(|| ExtractError::IndexOutOfRange {
                name: name.clone(),
                index,
                len: fragments.len(),
            })
    };

    let street = pick(layout.street)?;
    let number = match layout.number {
        Some(index) => pick(index)?,
        None => String::new(),
    };
    let block = pick(layout.block)?;
    let city = pick(layout.city)?;
    let state = pick(layout.state)?;
    let country = pick(layout.country)?;
    let postal_code = pick(layout.postal_code)?;

    Ok(AddressRecord {
        name,
        street,
        number,
        block,
        city,
        state,
        country,
        postal_code,
    })
}
