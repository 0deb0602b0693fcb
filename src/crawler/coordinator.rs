//! Harvest coordinator - sequential run orchestration
//!
//! This module contains the main harvest loop, which:
//! - Resolves the input address list
//! - Fetches, parses and extracts one address at a time
//! - Sleeps the configured delay between requests
//! - Hands pages to the output sink and threads the run index through the loop
//! - Finalizes the run index once the whole list is processed

use crate::config::Config;
use crate::crawler::{build_http_client, collect_seed_links, fetch_page, parse_document};
use crate::extract::extract_page;
use crate::model::{PageRecord, RunIndex};
use crate::output::{FileOutputHandler, OutputHandler};
use crate::HarvestError;
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, Instant};

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `config_hash` - Hash of the configuration file, recorded in the run index
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config, config_hash: Option<String>) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.scraper)?;
        Ok(Self {
            config,
            client,
            config_hash,
        })
    }

    /// Runs the harvest loop over an address list
    ///
    /// Addresses are processed strictly in order. Every failure is recorded
    /// in the run index and the loop moves on; the sink's `finalize` is
    /// called once after the last address.
    ///
    /// # Arguments
    ///
    /// * `addresses` - The addresses to harvest
    /// * `output` - Sink receiving each page and the final index
    ///
    /// # Returns
    ///
    /// * `Ok(RunIndex)` - The completed run index
    /// * `Err(HarvestError)` - The run index could not be persisted
    pub async fn run(
        &self,
        addresses: &[String],
        output: &mut dyn OutputHandler,
    ) -> Result<RunIndex, HarvestError> {
        let delay = Duration::from_millis(self.config.scraper.delay_ms);
        let start_time = Instant::now();
        let mut index = RunIndex::new(self.config_hash.clone());

        tracing::info!("Starting harvest of {} addresses", addresses.len());

        for (i, address) in addresses.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tracing::info!("[{}/{}] Processing {}", i + 1, addresses.len(), address);
            index = self.harvest_address(address, output, index).await;
        }

        output.finalize(&index)?;

        tracing::info!(
            "Harvest completed: {} pages, {} errors in {:?}",
            index.successful_pages,
            index.errors,
            start_time.elapsed()
        );

        Ok(index)
    }

    /// Processes one address and folds the outcome into the run index
    async fn harvest_address(
        &self,
        address: &str,
        output: &mut dyn OutputHandler,
        mut index: RunIndex,
    ) -> RunIndex {
        let page = match self.process_address(address).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to harvest {}: {}", address, e);
                index.record_error(address, e.to_string());
                return index;
            }
        };

        match output.record_page(&page) {
            Ok(filename) => {
                tracing::info!(
                    "Harvested '{}': {} tables, {} references",
                    page.title,
                    page.tables.len(),
                    page.references.len()
                );
                index.record_page(&page, filename);
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", address, e);
                index.record_error(address, HarvestError::from(e).to_string());
            }
        }

        index
    }

    /// Fetches and extracts a single address
    ///
    /// # Arguments
    ///
    /// * `address` - The page address
    ///
    /// # Returns
    ///
    /// * `Ok(PageRecord)` - The extracted page
    /// * `Err(HarvestError)` - The fetch failed or the body was empty
    pub async fn process_address(&self, address: &str) -> Result<PageRecord, HarvestError> {
        let fetched = fetch_page(&self.client, address).await?;

        if fetched.body.trim().is_empty() {
            return Err(HarvestError::Parse {
                url: address.to_string(),
                message: "empty document".to_string(),
            });
        }

        Ok(self.extract(address, &fetched.body))
    }

    fn extract(&self, address: &str, body: &str) -> PageRecord {
        let doc = parse_document(body);
        if doc.error_count() > 0 {
            tracing::debug!(
                "{} markup errors recovered while parsing {}",
                doc.error_count(),
                address
            );
        }
        extract_page(&doc, address, &self.config.scraper.base_url)
    }
}

/// Resolves the address list for a run
///
/// An explicit address wins, then the configured seed address, then links
/// scanned from the source directory capped at `max-pages`.
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `address` - Optional single address given on the command line
pub fn resolve_addresses(config: &Config, address: Option<&str>) -> Vec<String> {
    if let Some(address) = address.or(config.input.seed_url.as_deref()) {
        return vec![address.to_string()];
    }

    let mut links = collect_seed_links(Path::new(&config.input.source_dir));
    if links.len() > config.scraper.max_pages {
        tracing::info!(
            "Limiting run to the first {} of {} addresses",
            config.scraper.max_pages,
            links.len()
        );
        links.truncate(config.scraper.max_pages);
    }
    links
}

/// Runs a complete harvest writing into the configured output directory
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `config_hash` - Hash of the configuration file, if one was loaded
/// * `address` - Optional single address overriding the configured input
///
/// # Returns
///
/// * `Ok(RunIndex)` - Harvest completed
/// * `Err(HarvestError::NoInput)` - No addresses were found; nothing was written
/// * `Err(HarvestError)` - Setup failed or the run index could not be written
///
/// # Example
///
/// ```no_run
/// use wiki_harvest::config::Config;
/// use wiki_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let index = run_harvest(
///     Config::default(),
///     None,
///     Some("https://en.wikipedia.org/wiki/Tay_Bridge_disaster"),
/// )
/// .await?;
/// println!("{} pages", index.successful_pages);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(
    config: Config,
    config_hash: Option<String>,
    address: Option<&str>,
) -> Result<RunIndex, HarvestError> {
    let addresses = resolve_addresses(&config, address);
    if addresses.is_empty() {
        tracing::error!(
            "No input addresses found in {}; pass --url or set input.seed-url",
            config.input.source_dir
        );
        return Err(HarvestError::NoInput);
    }

    let mut output = FileOutputHandler::new(config.output.clone())?;
    let coordinator = Coordinator::new(config, config_hash)?;
    coordinator.run(&addresses, &mut output).await
}
