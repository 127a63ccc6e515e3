//! Listing page parser
//!
//! A municipality listing page holds one table; every anchor in its body
//! links to a business detail page.

use crate::extract::document::{find_all_within, HtmlDocument};
use url::Url;

const TABLE_BODY_SELECTOR: &str = "tbody";
const ANCHOR_SELECTOR: &str = "a";

/// Extracts the detail page URLs linked from a listing page
///
/// Only the first table body is considered. Hrefs are resolved against
/// `origin` and returned in document order. A page with no table body, or a
/// table body without anchors, yields an empty list.
///
/// # Example
///
/// ```
/// use pymes_scraper::extract::{extract_listing_urls, HtmlDocument};
/// use url::Url;
///
/// let doc = HtmlDocument::parse(
///     r#"<table><tbody><tr><td><a href="/pyme/a.html">A</a></td></tr></tbody></table>"#,
/// );
/// let origin = Url::parse("https://pymes.org.mx").unwrap();
/// assert_eq!(
///     extract_listing_urls(&doc, &origin),
///     vec!["https://pymes.org.mx/pyme/a.html".to_string()]
/// );
/// ```
pub fn extract_listing_urls(document: &HtmlDocument, origin: &Url) -> Vec<String> {
    let Some(table_body) = document.find_first(TABLE_BODY_SELECTOR) else {
        tracing::debug!("Listing page has no table body");
        return Vec::new();
    };

    let mut urls = Vec::new();

    for anchor in find_all_within(table_body, ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            tracing::debug!("Skipping listing anchor without href");
            continue;
        };

        match resolve_link(href, origin) {
            Some(url) => urls.push(url),
            None => tracing::debug!("Skipping unresolvable listing link {:?}", href),
        }
    }

    urls
}

/// Resolves a listing href to an absolute http(s) URL
fn resolve_link(href: &str, origin: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match origin.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url.to_string()),
        _ => None,
    }
}
