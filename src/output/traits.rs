//! Output sink trait
//!
//! The coordinator hands each finished page to an [`OutputHandler`] as soon
//! as it is extracted, and the run index once the whole list is done.

use crate::model::{PageRecord, RunIndex};
use crate::output::{clean_filename, OutputResult};

/// Trait for output sinks
pub trait OutputHandler {
    /// Persists one page record
    ///
    /// # Arguments
    ///
    /// * `page` - The extracted page
    ///
    /// # Returns
    ///
    /// The file stem the page was stored under, recorded in the run index
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<String>;

    /// Persists the run index after the last address was processed
    ///
    /// # Arguments
    ///
    /// * `index` - The completed run index
    fn finalize(&mut self, index: &RunIndex) -> OutputResult<()>;
}

/// Sink keeping everything in memory
///
/// Used by dry runs and tests that drive the coordinator without touching
/// the filesystem.
#[derive(Debug, Default)]
pub struct MemoryOutputHandler {
    pub pages: Vec<PageRecord>,
    pub index: Option<RunIndex>,
}

impl MemoryOutputHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputHandler for MemoryOutputHandler {
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<String> {
        self.pages.push(page.clone());
        Ok(clean_filename(&page.title))
    }

    fn finalize(&mut self, index: &RunIndex) -> OutputResult<()> {
        self.index = Some(index.clone());
        Ok(())
    }
}
