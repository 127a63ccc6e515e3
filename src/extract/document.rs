//! Parsed HTML document
//!
//! A thin layer over `scraper` exposing the few lookups the extractors
//! need: first match, all matches, matches inside an element, and the
//! text of an element.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Returns the first element matching `selector`, in document order
    pub fn find_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = parse_selector(selector)?;
        self.html.select(&selector).next()
    }

    /// Returns every element matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(selector) {
            Some(selector) => self.html.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

/// Returns every descendant of `element` matching `selector`, in document order
pub fn find_all_within<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match parse_selector(selector) {
        Some(selector) => element.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Concatenated text of all descendant text nodes
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Descendant text nodes, each trimmed, with whitespace-only nodes dropped
pub fn stripped_strings(element: ElementRef<'_>) -> Vec<String> {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}
