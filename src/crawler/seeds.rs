//! Input address sourcing
//!
//! Addresses come either from a single literal URL or from previously
//! harvested JSON files whose table rows carry in-page link lists.

use crate::output::{INDEX_CSV, INDEX_JSON};
use crate::url::WIKI_PATH_PREFIX;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Row fields holding `{ "url": ..., "text": ... }` link lists
const LINK_FIELDS: [&str; 2] = ["wikipedia_links", "_links"];

/// Collects wiki addresses from the JSON files in a directory
///
/// Every `*.json` file is read in file name order. Links are gathered from
/// `tables[].rows[]` entries and kept when their `url` contains `/wiki/`.
///
/// # Arguments
///
/// * `dir` - Directory to scan (not recursive)
///
/// # Returns
///
/// Unique addresses in first-seen order. A missing directory, unreadable or
/// malformed files yield no addresses rather than an error.
pub fn collect_seed_links(dir: &Path) -> Vec<String> {
    let files = match json_files(dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Could not scan {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for path in files {
        let document = match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
            }) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let before = links.len();
        for url in row_links(&document) {
            if seen.insert(url.clone()) {
                links.push(url);
            }
        }
        tracing::debug!(
            "{}: {} new addresses",
            path.display(),
            links.len() - before
        );
    }

    tracing::info!("Found {} unique addresses in {}", links.len(), dir.display());
    links
}

/// `*.json` files in a directory sorted by name, run index excluded
fn json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name != INDEX_JSON && name != INDEX_CSV)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Wiki link URLs from every table row of one document, in order
fn row_links(document: &Value) -> Vec<String> {
    let rows = document
        .get("tables")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|table| table.get("rows").and_then(Value::as_array))
        .flatten();

    let mut urls = Vec::new();
    for row in rows {
        for field in LINK_FIELDS {
            let Some(entries) = row.get(field).and_then(Value::as_array) else {
                continue;
            };
            urls.extend(
                entries
                    .iter()
                    .filter_map(|link| link.get("url").and_then(Value::as_str))
                    .filter(|url| url.contains(WIKI_PATH_PREFIX))
                    .map(str::to_string),
            );
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAGE_A: &str = r#"{
        "tables": [{
            "rows": [
                {"wikipedia_links": [
                    {"url": "https://en.wikipedia.org/wiki/Tay_Bridge", "text": "Tay Bridge"},
                    {"url": "https://example.org/elsewhere", "text": "x"}
                ]},
                {"_links": [{"url": "https://en.wikipedia.org/wiki/Dundee"}]}
            ]
        }]
    }"#;

    const PAGE_B: &str = r#"{
        "tables": [{
            "rows": [
                {"wikipedia_links": [
                    {"url": "https://en.wikipedia.org/wiki/Dundee"},
                    {"url": "https://en.wikipedia.org/wiki/Firth_of_Tay"}
                ]}
            ]
        }]
    }"#;

    #[test]
    fn test_collect_seed_links_dedup_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), PAGE_A).unwrap();
        fs::write(dir.path().join("b.json"), PAGE_B).unwrap();

        let links = collect_seed_links(dir.path());

        assert_eq!(
            links,
            vec![
                "https://en.wikipedia.org/wiki/Tay_Bridge",
                "https://en.wikipedia.org/wiki/Dundee",
                "https://en.wikipedia.org/wiki/Firth_of_Tay",
            ]
        );
    }

    #[test]
    fn test_collect_seed_links_skips_bad_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{broken").unwrap();
        fs::write(dir.path().join("b.json"), PAGE_B).unwrap();
        fs::write(dir.path().join("c.txt"), PAGE_A).unwrap();
        fs::write(dir.path().join(INDEX_JSON), PAGE_A).unwrap();

        let links = collect_seed_links(dir.path());
        assert_eq!(links.len(), 2);
        assert!(!links.iter().any(|l| l.contains("Tay_Bridge")));
    }

    #[test]
    fn test_collect_seed_links_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(collect_seed_links(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_row_links_without_tables() {
        let document: Value = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert!(row_links(&document).is_empty());
    }
}
