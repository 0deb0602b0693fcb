//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with the identifying user agent and timeout
//! - GET requests to fetch page markup
//! - Error classification into [`FetchError`] variants
//!
//! Failed fetches are never retried; the coordinator logs them and moves on.

use crate::config::{ScraperConfig, UserAgentConfig};
use crate::url::validate_address;
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const MAX_REDIRECTS: usize = 10;

/// Markup returned by a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `scraper` - Fetch settings supplying the request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wiki_harvest::config::Config;
/// use wiki_harvest::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.scraper).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    scraper: &ScraperConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(user_agent.header_value())
        .default_headers(headers)
        .timeout(Duration::from_secs(scraper.timeout_secs))
        .connect_timeout(Duration::from_secs(scraper.timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one address
///
/// # Error Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | Not an HTTP(S) URL | `InvalidAddress`, no request sent |
/// | Non-2xx status | `Status` |
/// | Timeout | `Timeout` |
/// | Connection / TLS / redirect failure | `Network` |
/// | Body could not be decoded | `Body` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The address to fetch
///
/// # Returns
///
/// The page markup or the classified failure
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let address = validate_address(url).map_err(|reason| FetchError::InvalidAddress {
        url: url.to_string(),
        reason,
    })?;

    let response = client
        .get(address)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    tracing::debug!("Fetched {} ({} bytes, HTTP {})", final_url, body.len(), status);

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Maps a transport error onto the fetch taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
