//! Fragment clean-up
//!
//! Address fragments on detail pages are written as a comma separated
//! sentence, so most of them carry a trailing comma.

/// Trims surrounding whitespace and removes one trailing comma
///
/// Only a single comma is removed; whitespace left in front of it is kept.
/// An empty or all-whitespace input yields an empty string.
///
/// # Example
///
/// ```
/// use pymes_scraper::extract::normalize;
///
/// assert_eq!(normalize(" Av. Xalapa, "), "Av. Xalapa");
/// assert_eq!(normalize("Centro"), "Centro");
/// ```
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    text.strip_suffix(',').unwrap_or(text).to_string()
}
