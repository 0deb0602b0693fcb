//! Integration tests for the harvester
//!
//! These tests use wiremock to serve mock Wikipedia pages and run the full
//! fetch, extract and write cycle into temporary directories.

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiki_harvest::config::Config;
use wiki_harvest::crawler::{run_harvest, Coordinator};
use wiki_harvest::output::{read_page, run_analysis, FileOutputHandler, MemoryOutputHandler};
use wiki_harvest::{HarvestError, RunIndex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISASTER_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Tay Bridge disaster - Wikipedia</title></head><body>
<h1 class="firstHeading">Tay Bridge disaster</h1>
<div id="mw-content-text"><div class="mw-parser-output">
  <p>The Tay Bridge disaster occurred on 28 December 1879 in Scotland when the bridge collapsed.</p>
  <h2>Collapse</h2>
  <p>A passenger train was crossing the bridge during a violent storm that night.</p>
  <table class="wikitable">
    <tr><th>Date</th><th>Event</th></tr>
    <tr><td>1879</td><td><a href="/wiki/Tay_Rail_Bridge">Bridge</a> falls [1][2]</td></tr>
    <tr><td>1880</td><td>Court of inquiry [3]</td></tr>
  </table>
  <h2>External links</h2>
  <ol class="references">
    <li id="cite_note-1"><span class="reference-text"><a href="http://example.org/a">Inquiry report</a></span></li>
    <li id="cite_note-3"><span class="reference-text">Hansard, see http://example.org/c.</span></li>
  </ol>
</div></div>
<div id="mw-normal-catlinks"><ul>
  <li><a href="/wiki/Category:1879_disasters">1879 disasters</a></li>
  <li><a href="/wiki/Category:Bridge_disasters">Bridge disasters</a></li>
</ul></div>
</body></html>"#;

/// Creates a test configuration writing into the given directory
fn create_test_config(server: &MockServer, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.scraper.base_url = server.uri();
    config.scraper.delay_ms = 0;
    config.scraper.timeout_secs = 5;
    config.output.output_dir = output_dir.to_string_lossy().into_owned();
    config.output.reports_dir = output_dir.join("reports").to_string_lossy().into_owned();
    config
}

async fn mount_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/wiki/Tay_Bridge_disaster"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DISASTER_PAGE)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Missing_page"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_writes_all_outputs() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let out = tempdir().unwrap();
    let config = create_test_config(&server, out.path());
    let addresses = vec![
        format!("{}/wiki/Tay_Bridge_disaster", server.uri()),
        format!("{}/wiki/Missing_page", server.uri()),
    ];

    let coordinator = Coordinator::new(config.clone(), Some("hash123".to_string())).unwrap();
    let mut output = FileOutputHandler::new(config.output.clone()).unwrap();
    let index = coordinator.run(&addresses, &mut output).await.unwrap();

    assert_eq!(index.total_pages, 2);
    assert_eq!(index.successful_pages, 1);
    assert_eq!(index.errors, 1);
    assert_eq!(index.error_log[0].url, addresses[1]);

    for name in [
        "Tay_Bridge_disaster.json",
        "Tay_Bridge_disaster.csv",
        "Tay_Bridge_disaster_report.txt",
        "MASTER_INDEX.json",
        "MASTER_INDEX.csv",
        "RUN_REPORT.txt",
    ] {
        assert!(out.path().join(name).exists(), "missing output file {}", name);
    }

    let page = read_page(&out.path().join("Tay_Bridge_disaster.json")).unwrap();
    assert_eq!(page.title, "Tay Bridge disaster");
    assert_eq!(page.sections.len(), 2);
    assert_eq!(page.sections[0].title, "Collapse");
    assert_eq!(page.categories, vec!["1879 disasters", "Bridge disasters"]);

    let numbers: Vec<u32> = page.references.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(page.references[0].url.as_deref(), Some("http://example.org/a"));
    assert_eq!(page.references[1].url.as_deref(), Some("http://example.org/c"));

    let table = &page.tables[0];
    assert_eq!(table.headers, vec!["Date", "Event"]);
    assert_eq!(table.rows.len(), 2);

    let first = &table.rows[0];
    assert_eq!(first.wikipedia_links.len(), 1);
    assert_eq!(
        first.wikipedia_links[0].url,
        format!("{}/wiki/Tay_Rail_Bridge", server.uri())
    );
    assert_eq!(first.external_references.len(), 1);
    assert_eq!(first.external_references[0].reference_number, 1);
    assert_eq!(
        first.external_references[0].url.as_deref(),
        Some("http://example.org/a")
    );

    let second = &table.rows[1];
    assert_eq!(second.external_references.len(), 1);
    assert_eq!(second.external_references[0].reference_number, 3);

    let stored: RunIndex = serde_json::from_str(
        &fs::read_to_string(out.path().join("MASTER_INDEX.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored.pages.len(), 1);
    assert_eq!(stored.pages[0].filename, "Tay_Bridge_disaster");
    assert_eq!(stored.config_hash.as_deref(), Some("hash123"));

    let csv = fs::read_to_string(out.path().join("Tay_Bridge_disaster.csv")).unwrap();
    assert!(csv.contains("=== TABLE 1: Tay Bridge disaster ==="));
    assert!(csv.contains("[1] http://example.org/a"));

    let index_csv = fs::read_to_string(out.path().join("MASTER_INDEX.csv")).unwrap();
    assert!(index_csv.starts_with("Title,URL,Filename,Summary,Scraped_At\n"));
    assert!(index_csv.contains("\"Tay Bridge disaster\""));
}

#[tokio::test]
async fn test_harvest_single_address_with_optional_files_disabled() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let out = tempdir().unwrap();
    let mut config = create_test_config(&server, out.path());
    config.output.enhanced_csv = false;
    config.output.page_reports = false;
    config.output.run_report = false;

    let address = format!("{}/wiki/Tay_Bridge_disaster", server.uri());
    let index = run_harvest(config, None, Some(&address)).await.unwrap();

    assert_eq!(index.successful_pages, 1);
    assert!(out.path().join("Tay_Bridge_disaster.json").exists());
    assert!(out.path().join("MASTER_INDEX.json").exists());
    assert!(!out.path().join("Tay_Bridge_disaster.csv").exists());
    assert!(!out.path().join("Tay_Bridge_disaster_report.txt").exists());
    assert!(!out.path().join("RUN_REPORT.txt").exists());
}

#[tokio::test]
async fn test_harvest_from_earlier_output() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let source = tempdir().unwrap();
    fs::write(
        source.path().join("list.json"),
        format!(
            r#"{{"tables": [{{"rows": [
                {{"wikipedia_links": [{{"url": "{0}/wiki/Tay_Bridge_disaster", "text": "Tay"}}]}},
                {{"_links": [{{"url": "{0}/wiki/Missing_page"}}]}}
            ]}}]}}"#,
            server.uri()
        ),
    )
    .unwrap();

    let out = tempdir().unwrap();
    let mut config = create_test_config(&server, out.path());
    config.input.source_dir = source.path().to_string_lossy().into_owned();

    let index = run_harvest(config, None, None).await.unwrap();

    assert_eq!(index.total_pages, 2);
    assert_eq!(index.successful_pages, 1);
    assert_eq!(index.errors, 1);
}

#[tokio::test]
async fn test_empty_input_stops_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = tempdir().unwrap();
    let out = tempdir().unwrap();
    let mut config = create_test_config(&server, &out.path().join("pages"));
    config.input.source_dir = source.path().to_string_lossy().into_owned();

    let result = run_harvest(config, None, None).await;

    assert!(matches!(result, Err(HarvestError::NoInput)));
    assert!(!out.path().join("pages").exists());
}

#[tokio::test]
async fn test_empty_list_produces_empty_run_log() {
    let server = MockServer::start().await;
    let out = tempdir().unwrap();
    let config = create_test_config(&server, out.path());

    let coordinator = Coordinator::new(config, None).unwrap();
    let mut output = MemoryOutputHandler::new();
    let index = coordinator.run(&[], &mut output).await.unwrap();

    assert_eq!(index.successful_pages, 0);
    assert_eq!(index.errors, 0);
    assert_eq!(output.index.map(|i| i.total_pages), Some(0));
}

#[tokio::test]
async fn test_analysis_over_harvested_pages() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let out = tempdir().unwrap();
    let config = create_test_config(&server, out.path());
    let reports_dir = Path::new(&config.output.reports_dir).to_path_buf();

    let address = format!("{}/wiki/Tay_Bridge_disaster", server.uri());
    run_harvest(config, None, Some(&address)).await.unwrap();

    let summary = run_analysis(out.path(), &reports_dir).unwrap();

    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.pages[0].location, "Scotland");
    assert_eq!(summary.pages[0].years, vec![1879]);
    assert!(reports_dir.join("ANALYSIS_REPORT.txt").exists());

    let timeline = fs::read_to_string(reports_dir.join("TIMELINE_DATA.csv")).unwrap();
    assert_eq!(timeline, "Decade,Page_Count\n1870s,1\n");
}
