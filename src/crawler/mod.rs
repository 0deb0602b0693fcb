//! Crawler module for page fetching and run coordination
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with the identifying user agent
//! - HTML parsing and selector helpers used by the extractors
//! - Input address sourcing from earlier output
//! - Sequential run coordination

mod coordinator;
mod fetcher;
mod parser;
mod seeds;

pub use coordinator::{resolve_addresses, run_harvest, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{
    child_elements, element_text, first_in, flat_text, has_class, joined_text, parse_document,
    select_in, tag_name, ParsedDocument,
};
pub use seeds::collect_seed_links;
