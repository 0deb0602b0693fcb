//! Markup parser for fetched pages
//!
//! This module wraps raw page markup in a queryable document tree and
//! provides the small set of selection helpers the extractors share:
//! - CSS selection from the document root or from any element
//! - Whitespace-trimmed text of an element subtree
//! - Direct element children in document order

use scraper::{ElementRef, Html, Selector};

/// A parsed page ready for extraction
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parses a full HTML document
    ///
    /// Parsing never fails; malformed markup is repaired by the HTML5
    /// tree builder the same way a browser would.
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_harvest::crawler::parse_document;
    ///
    /// let doc = parse_document(r#"<h1 class="firstHeading">Rust</h1>"#);
    /// assert_eq!(doc.select("h1.firstHeading").len(), 1);
    /// ```
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        select_in(self.root(), css)
    }

    /// The first element matching a CSS selector
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        first_in(self.root(), css)
    }

    /// Number of parse errors the tree builder recovered from
    pub fn error_count(&self) -> usize {
        self.html.errors.len()
    }
}

/// Convenience wrapper for [`ParsedDocument::parse`]
pub fn parse_document(html: &str) -> ParsedDocument {
    ParsedDocument::parse(html)
}

/// Compiles a selector, logging and yielding `None` for invalid input
fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// All descendants of `root` matching a CSS selector
pub fn select_in<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match compile(css) {
        Some(selector) => root.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// The first descendant of `root` matching a CSS selector
pub fn first_in<'a>(root: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = compile(css)?;
    let first = root.select(&selector).next();
    first
}

/// Concatenated text of an element's subtree, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text with newlines flattened to spaces, as used for table cells
pub fn flat_text(element: ElementRef<'_>) -> String {
    element_text(element).replace('\n', " ")
}

/// Concatenated trimmed text of several elements
pub fn joined_text(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Element children of `parent`, skipping text and comment nodes
pub fn child_elements<'a>(parent: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    parent.children().filter_map(ElementRef::wrap)
}

/// Lower-cased tag name of an element
pub fn tag_name(element: ElementRef<'_>) -> String {
    element.value().name().to_ascii_lowercase()
}

/// Returns true if the element carries the given class
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
