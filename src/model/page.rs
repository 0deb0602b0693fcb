use crate::model::{Reference, TableRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scraped document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Address the page was fetched from
    pub url: String,

    pub title: String,

    /// Leading paragraphs joined by blank lines
    pub summary: String,

    /// Infobox header/value pairs; later duplicate keys overwrite earlier ones
    pub infobox: BTreeMap<String, String>,

    pub sections: Vec<Section>,

    pub external_links: Vec<ExternalLink>,

    /// Citations sorted by footnote number, unique by identifier
    pub references: Vec<Reference>,

    pub tables: Vec<TableRecord>,

    pub categories: Vec<String>,

    pub coordinates: Option<String>,

    pub scraped_at: DateTime<Utc>,
}

impl PageRecord {
    /// Number of references that resolved to an external address
    pub fn resolved_reference_count(&self) -> usize {
        self.references.iter().filter(|r| r.url.is_some()).count()
    }

    /// Total data rows across all tables
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }
}

/// A heading and the paragraphs that follow it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading level, 2 through 4
    pub level: u8,
    pub title: String,
    pub content: Vec<String>,
}

impl Section {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: Vec::new(),
        }
    }
}

/// An outbound link found in the external links list or the reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub url: String,
    pub text: String,
    /// `Some("references")` when the link came from the citation list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
