//! CSV flattening of tables and the run index
//!
//! Header lines are quoted only where needed; every data field is quoted.

use crate::model::{PageRecord, RowRecord, RunIndex, TableRecord};
use crate::output::{OutputError, OutputResult};
use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};

const INDEX_HEADER: &str = "Title,URL,Filename,Summary,Scraped_At";
const EXTRA_COLUMNS: [&str; 4] = [
    "Wikipedia_Links",
    "External_Sources_Count",
    "External_URLs",
    "Extraction_Methods",
];
const LIST_SEPARATOR: &str = " | ";

/// Writes rows of fields through a csv writer with the given quoting
pub(crate) fn csv_rows<I, R>(rows: I, style: QuoteStyle) -> OutputResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Write(e.to_string()))
}

/// Writes rows of fields with every field quoted
fn quoted_rows<I, R>(rows: I) -> OutputResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    csv_rows(rows, QuoteStyle::Always)
}

/// Renders the run index as CSV, one line per harvested page
pub fn format_index_csv(index: &RunIndex) -> OutputResult<String> {
    let rows = index.pages.iter().map(|page| {
        vec![
            page.title.clone(),
            page.url.clone(),
            page.filename.clone(),
            page.summary.replace('\n', " "),
            page.scraped_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
    });

    Ok(format!("{}\n{}", INDEX_HEADER, quoted_rows(rows)?))
}

/// Renders every table of a page with flattened link and reference columns
///
/// Each table is preceded by a `=== TABLE n: title ===` banner line.
pub fn format_tables_csv(page: &PageRecord) -> OutputResult<String> {
    let mut out = String::new();

    for (position, table) in page.tables.iter().enumerate() {
        out.push_str(&format!("\n=== TABLE {}: {} ===\n", position + 1, page.title));
        out.push_str(&table_header(table)?);
        out.push_str(&quoted_rows(table.rows.iter().map(|row| row_fields(table, row)))?);
        out.push('\n');
    }

    Ok(out)
}

/// Header line, quoted only where a header needs it
fn table_header(table: &TableRecord) -> OutputResult<String> {
    let fields = table
        .headers
        .iter()
        .cloned()
        .chain(EXTRA_COLUMNS.map(String::from))
        .collect::<Vec<_>>();
    csv_rows([fields], QuoteStyle::Necessary)
}

fn row_fields(table: &TableRecord, row: &RowRecord) -> Vec<String> {
    let mut fields: Vec<String> = table
        .headers
        .iter()
        .map(|header| row.cell(header).to_string())
        .collect();

    fields.push(
        row.wikipedia_links
            .iter()
            .map(|link| format!("{}: {}", link.text, link.url))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
    );

    fields.push(row.external_references.len().to_string());

    fields.push(
        row.external_references
            .iter()
            .map(|r| {
                format!(
                    "[{}] {}",
                    r.reference_number,
                    r.url.as_deref().unwrap_or("No URL found")
                )
            })
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
    );

    fields.push(
        row.external_references
            .iter()
            .map(|r| {
                let methods = if r.extraction_methods.is_empty() {
                    "N/A"
                } else {
                    r.extraction_methods.as_str()
                };
                format!("[{}] {}", r.reference_number, methods)
            })
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
    );

    fields
}
