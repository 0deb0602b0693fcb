//! Table extraction with per-cell footnote resolution

use crate::crawler::{element_text, flat_text, select_in, ParsedDocument};
use crate::extract::references::ReferenceResolver;
use crate::model::{RowRecord, TableRecord, WikiLink};
use crate::url::{is_wiki_href, resolve_wiki_href};

/// Extracts every `table.wikitable` on the page
///
/// Header names come from the non-empty `th` cells of the first row. Each
/// later row with at least one `td` becomes a [`RowRecord`]; cell `i` is keyed
/// by header `i`, or `column_i` when the row is wider than the header list.
/// Tables without headers are dropped.
///
/// # Arguments
///
/// * `doc` - The parsed page
/// * `resolver` - Lookup over the page's reference list
/// * `base_url` - Prefix for in-page `/wiki/` links
pub fn extract_tables(
    doc: &ParsedDocument,
    resolver: &ReferenceResolver<'_>,
    base_url: &str,
) -> Vec<TableRecord> {
    let mut tables = Vec::new();

    for (index, table) in doc.select("table.wikitable").into_iter().enumerate() {
        let rows = select_in(table, "tr");
        let Some((header_row, data_rows)) = rows.split_first() else {
            continue;
        };

        let headers: Vec<String> = select_in(*header_row, "th")
            .into_iter()
            .map(flat_text)
            .filter(|h| !h.is_empty())
            .collect();

        if headers.is_empty() {
            tracing::debug!("Skipping table {} without headers", index);
            continue;
        }

        let rows = data_rows
            .iter()
            .filter_map(|row| extract_row(*row, &headers, resolver, base_url))
            .collect();

        tables.push(TableRecord {
            index,
            headers,
            rows,
        });
    }

    tables
}

fn extract_row(
    row: scraper::ElementRef<'_>,
    headers: &[String],
    resolver: &ReferenceResolver<'_>,
    base_url: &str,
) -> Option<RowRecord> {
    let cells = select_in(row, "td");
    if cells.is_empty() {
        return None;
    }

    let mut record = RowRecord::default();

    for (i, cell) in cells.into_iter().enumerate() {
        let text = flat_text(cell);
        let header = headers
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("column_{}", i));

        for link in select_in(cell, "a[href]") {
            if let Some(href) = link.value().attr("href").filter(|h| is_wiki_href(h)) {
                record.wikipedia_links.push(WikiLink {
                    url: resolve_wiki_href(base_url, href),
                    text: element_text(link),
                });
            }
        }

        record.external_references.extend(resolver.resolve(&text));
        record.cells.insert(header, text);
    }

    Some(record)
}
