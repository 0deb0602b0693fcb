//! Output module for writing harvest results
//!
//! This module handles:
//! - Writing page records and the run index as JSON
//! - Flattening tables and the run index to CSV
//! - Plain-text page and run reports
//! - Analysis reports built from previously written pages

pub mod analysis;
mod csv_output;
mod files;
mod json;
mod report;
mod traits;

pub use analysis::{run_analysis, AnalysisSummary, EventType, PageAnalysis};
pub use csv_output::{format_index_csv, format_tables_csv};
pub use files::FileOutputHandler;
pub use json::{read_page, to_json_string, write_json};
pub use report::{format_page_report, format_run_report};
pub use traits::{MemoryOutputHandler, OutputHandler};

use thiserror::Error;

/// File name of the JSON run index
pub const INDEX_JSON: &str = "MASTER_INDEX.json";
/// File name of the CSV run index
pub const INDEX_CSV: &str = "MASTER_INDEX.csv";
/// File name of the plain-text run report
pub const RUN_REPORT: &str = "RUN_REPORT.txt";

const MAX_FILENAME_CHARS: usize = 100;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No harvested pages found in {0}")]
    NoPages(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Turns a page title into a file stem
///
/// Characters other than ASCII letters, digits and whitespace are removed,
/// whitespace runs become `_`, and the result is capped at 100 characters.
///
/// # Examples
///
/// ```
/// use wiki_harvest::output::clean_filename;
///
/// assert_eq!(clean_filename("Tay Bridge disaster (1879)"), "Tay_Bridge_disaster_1879");
/// assert_eq!(clean_filename("???"), "untitled");
/// ```
pub fn clean_filename(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
                in_whitespace = true;
            }
        } else if c.is_ascii_alphanumeric() {
            stem.push(c);
            in_whitespace = false;
        }
    }

    if !stem.chars().any(|c| c.is_ascii_alphanumeric()) {
        return "untitled".to_string();
    }

    stem.chars().take(MAX_FILENAME_CHARS).collect()
}
