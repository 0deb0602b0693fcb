//! Wiki-Harvest: a sequential Wikipedia page harvester
//!
//! This crate fetches Wikipedia pages one at a time, extracts their summary,
//! infobox, sections, links, references and tables, resolves table footnote
//! markers against the page's reference list, and writes the results as
//! JSON, CSV and plain-text reports.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Wiki-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No input addresses to harvest")]
    NoInput,
}

/// Errors raised while fetching a single address
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid address {url}: {reason}")]
    InvalidAddress { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The address the failed fetch was issued against
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidAddress { url, .. }
            | Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wiki-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Coordinator};
pub use model::{PageRecord, Reference, RunIndex, TableRecord};
