use crate::model::ResolvedReference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `wikitable` with its header row and data rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Position of the table among all wikitables on the page
    pub index: usize,
    pub headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

/// One data row of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Cell text keyed by header name (`column_N` past the header list)
    pub cells: BTreeMap<String, String>,

    /// In-page article links found in the row's cells
    pub wikipedia_links: Vec<WikiLink>,

    /// Footnote markers that matched a page reference
    pub external_references: Vec<ResolvedReference>,
}

impl RowRecord {
    /// Cell text for a header, empty when the row has no such cell
    pub fn cell(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }
}

/// A link to another article on the same wiki
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiLink {
    pub url: String,
    pub text: String,
}
