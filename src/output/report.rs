//! Plain-text page and run reports

use crate::model::{PageRecord, RunIndex};
use chrono::SecondsFormat;

/// Formats the report for one page
///
/// Fixed section order: page metadata, counts, per-table breakdown, totals,
/// then every reference that resolved to an address.
pub fn format_page_report(page: &PageRecord) -> String {
    let mut report = String::new();
    write_page_report(&mut report, page);
    report
}

fn write_page_report(out: &mut String, page: &PageRecord) {
    out.push_str("WIKIPEDIA SCRAPING REPORT\n");
    out.push_str("================================\n");
    out.push('\n');
    out.push_str(&format!("Page: {}\n", page.title));
    out.push_str(&format!("URL: {}\n", page.url));
    out.push_str(&format!(
        "Scraped: {}\n",
        page.scraped_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    out.push('\n');

    out.push_str("SUMMARY:\n");
    out.push_str(&format!("- Tables found: {}\n", page.tables.len()));
    out.push_str(&format!("- Total references: {}\n", page.references.len()));
    out.push_str(&format!("- References with URLs: {}\n", page.resolved_reference_count()));
    out.push_str(&format!("- Sections: {}\n", page.sections.len()));
    out.push_str(&format!("- External links: {}\n", page.external_links.len()));
    out.push_str(&format!("- Categories: {}\n", page.categories.len()));

    let mut total_links = 0;
    let mut total_refs = 0;

    for (position, table) in page.tables.iter().enumerate() {
        for row in &table.rows {
            total_links += row.wikipedia_links.len();
            total_refs += row.external_references.len();
        }
        out.push('\n');
        out.push_str(&format!("Table {}: {} rows\n", position + 1, table.rows.len()));
        out.push_str(&format!("Headers: {}\n", table.headers.join(", ")));
    }

    out.push('\n');
    out.push_str("TOTALS:\n");
    out.push_str(&format!("- Total rows: {}\n", page.total_rows()));
    out.push_str(&format!("- Total Wikipedia links: {}\n", total_links));
    out.push_str(&format!("- Total external references: {}\n", total_refs));

    out.push('\n');
    out.push_str("EXTERNAL REFERENCES FOUND:\n");
    for reference in &page.references {
        if let Some(url) = &reference.url {
            out.push_str(&format!("[{}] {}\n", reference.number, url));
        }
    }
}

/// Formats the report for a whole run
pub fn format_run_report(index: &RunIndex) -> String {
    let mut report = String::new();
    write_run_report(&mut report, index);
    report
}

fn write_run_report(out: &mut String, index: &RunIndex) {
    let rule = "=".repeat(60);

    out.push_str("HARVEST RUN REPORT\n");
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!(
        "Crawled at: {}\n",
        index.crawled_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    if let Some(hash) = &index.config_hash {
        out.push_str(&format!("Config hash: {}\n", hash));
    }
    out.push('\n');
    out.push_str(&format!("Addresses attempted: {}\n", index.total_pages));
    out.push_str(&format!("Pages harvested: {}\n", index.successful_pages));
    out.push_str(&format!("Errors encountered: {}\n", index.errors));

    out.push('\n');
    out.push_str("PAGES:\n");
    if index.pages.is_empty() {
        out.push_str("(none)\n");
    }
    for (i, page) in index.pages.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} ({}.json)\n",
            i + 1,
            page.title,
            page.url,
            page.filename
        ));
    }

    out.push('\n');
    out.push_str("ERRORS:\n");
    if index.error_log.is_empty() {
        out.push_str("(none)\n");
    }
    for entry in &index.error_log {
        out.push_str(&format!("- {}: {}\n", entry.url, entry.error));
    }

    out.push_str(&format!("{}\n", rule));
}
