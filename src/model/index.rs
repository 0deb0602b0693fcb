use crate::model::PageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of the page summary kept in an index entry
pub const INDEX_SUMMARY_CHARS: usize = 200;

/// Cumulative record of one harvest run
///
/// The coordinator threads a `RunIndex` value through the sequential loop and
/// hands it to the output sink once the whole address list is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunIndex {
    /// Number of addresses attempted
    pub total_pages: usize,
    pub successful_pages: usize,
    pub errors: usize,
    pub crawled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    pub pages: Vec<IndexEntry>,
    pub error_log: Vec<ErrorEntry>,
}

impl RunIndex {
    /// Creates an empty index stamped with the current time
    pub fn new(config_hash: Option<String>) -> Self {
        Self {
            total_pages: 0,
            successful_pages: 0,
            errors: 0,
            crawled_at: Utc::now(),
            config_hash,
            pages: Vec::new(),
            error_log: Vec::new(),
        }
    }

    /// Records a successfully written page
    pub fn record_page(&mut self, page: &PageRecord, filename: String) {
        self.total_pages += 1;
        self.successful_pages += 1;
        self.pages.push(IndexEntry {
            title: page.title.clone(),
            url: page.url.clone(),
            filename,
            summary: page.summary.chars().take(INDEX_SUMMARY_CHARS).collect(),
            scraped_at: page.scraped_at,
        });
    }

    /// Records a failed address
    pub fn record_error(&mut self, url: impl Into<String>, error: impl Into<String>) {
        self.total_pages += 1;
        self.errors += 1;
        self.error_log.push(ErrorEntry {
            url: url.into(),
            error: error.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.error_log.is_empty()
    }
}

/// Summary of one successfully harvested page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub url: String,
    /// File stem the page was written under
    pub filename: String,
    pub summary: String,
    pub scraped_at: DateTime<Utc>,
}

/// An address that failed, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub url: String,
    pub error: String,
}
