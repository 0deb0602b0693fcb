//! Extractors turning a parsed page into a [`PageRecord`]
//!
//! This module contains:
//! - Page-level extractors (title, summary, infobox, sections, links,
//!   categories, coordinates)
//! - The reference list builder and footnote resolver
//! - Table extraction with per-cell footnote resolution

mod page;
mod references;
mod tables;

pub use page::{
    extract_categories, extract_coordinates, extract_external_links, extract_infobox,
    extract_sections, extract_summary, extract_title,
};
pub use references::{
    extract_candidates, extract_references, footnote_markers, parse_reference_number,
    process_reference, ReferenceResolver,
};
pub use tables::extract_tables;

use crate::crawler::ParsedDocument;
use crate::model::PageRecord;
use chrono::Utc;

/// Runs every extractor over a parsed page
///
/// The reference list is built first and shared by all table rows on the
/// page through a single [`ReferenceResolver`].
///
/// # Arguments
///
/// * `doc` - The parsed page
/// * `url` - Address the page was fetched from
/// * `base_url` - Prefix for in-page `/wiki/` links
pub fn extract_page(doc: &ParsedDocument, url: &str, base_url: &str) -> PageRecord {
    let references = extract_references(doc);
    let tables = {
        let resolver = ReferenceResolver::new(&references);
        extract_tables(doc, &resolver, base_url)
    };

    let record = PageRecord {
        url: url.to_string(),
        title: extract_title(doc),
        summary: extract_summary(doc),
        infobox: extract_infobox(doc),
        sections: extract_sections(doc),
        external_links: extract_external_links(doc),
        references,
        tables,
        categories: extract_categories(doc),
        coordinates: extract_coordinates(doc),
        scraped_at: Utc::now(),
    };

    tracing::debug!(
        "Extracted '{}': {} sections, {} tables, {} references, {} external links",
        record.title,
        record.sections.len(),
        record.tables.len(),
        record.references.len(),
        record.external_links.len()
    );

    record
}
