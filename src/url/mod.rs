//! Address handling for Wiki-Harvest
//!
//! This module validates input addresses and turns the relative `/wiki/`
//! links found inside page markup into absolute addresses.

use url::Url;

/// Prefix shared by every in-page article link
pub const WIKI_PATH_PREFIX: &str = "/wiki/";

/// Validates that an address is a syntactically valid HTTP(S) URL
///
/// # Arguments
///
/// * `address` - The address to check
///
/// # Returns
///
/// * `Ok(Url)` - The parsed address
/// * `Err(String)` - Why the address was rejected
///
/// # Examples
///
/// ```
/// use wiki_harvest::url::validate_address;
///
/// assert!(validate_address("https://en.wikipedia.org/wiki/Rust").is_ok());
/// assert!(validate_address("mailto:someone@example.com").is_err());
/// ```
pub fn validate_address(address: &str) -> Result<Url, String> {
    let url = Url::parse(address.trim()).map_err(|e| e.to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }

    Ok(url)
}

/// Returns true if an href points at another article on the same wiki
pub fn is_wiki_href(href: &str) -> bool {
    href.starts_with(WIKI_PATH_PREFIX)
}

/// Returns true if an href is an absolute external address
///
/// Matches any href beginning with `http`, the test the citation markup
/// relies on (protocol-relative and fragment links are rejected).
pub fn is_external_href(href: &str) -> bool {
    href.starts_with("http")
}

/// Joins a `/wiki/...` href onto the configured base address
///
/// # Examples
///
/// ```
/// use wiki_harvest::url::resolve_wiki_href;
///
/// assert_eq!(
///     resolve_wiki_href("https://en.wikipedia.org/", "/wiki/Rust"),
///     "https://en.wikipedia.org/wiki/Rust"
/// );
/// ```
pub fn resolve_wiki_href(base_url: &str, href: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), href)
}
