//! Configuration module for Wiki-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so a run without a configuration file behaves
//! like the stock harvester.
//!
//! # Example
//!
//! ```no_run
//! use wiki_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Delay between requests: {}ms", config.scraper.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, InputConfig, OutputConfig, ScraperConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
