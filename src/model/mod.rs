//! Record types produced by a harvest run
//!
//! A [`PageRecord`] owns everything extracted from one document. Table rows
//! refer to the page's [`Reference`] list by footnote number and only hold
//! copies of the resolved fields, never the references themselves.

mod index;
mod page;
mod reference;
mod table;

pub use index::{ErrorEntry, IndexEntry, RunIndex};
pub use page::{ExternalLink, PageRecord, Section};
pub use reference::{ExtractionStrategy, Reference, ResolvedReference, UrlCandidate};
pub use table::{RowRecord, TableRecord, WikiLink};
