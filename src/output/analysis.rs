//! Analysis reports over harvested pages
//!
//! Reads every page file in the output directory and aggregates them by
//! event type, location, decade and source count. Results are written as a
//! plain-text report plus three CSV breakdowns.

use crate::output::csv_output::csv_rows;
use crate::output::{OutputError, OutputResult, INDEX_JSON};
use csv::QuoteStyle;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Main report file
pub const ANALYSIS_REPORT: &str = "ANALYSIS_REPORT.txt";
/// Type breakdown CSV
pub const EVENT_TYPES_CSV: &str = "EVENT_TYPES.csv";
/// Decade timeline CSV
pub const TIMELINE_CSV: &str = "TIMELINE_DATA.csv";
/// Location breakdown CSV
pub const LOCATION_CSV: &str = "LOCATION_ANALYSIS.csv";

const SUMMARY_PREFIX_CHARS: usize = 200;
const UNKNOWN_LOCATION: &str = "Unknown";

/// Place names looked for in title and summary, first match wins
const LOCATIONS: [&str; 11] = [
    "England", "Ireland", "Scotland", "Wales", "Britain", "UK", "Europe", "Asia", "Africa",
    "America", "London",
];

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1[0-9]{3}|20[0-9]{2})\b").unwrap());

/// Coarse classification of what a page describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    PandemicDisease,
    Famine,
    NaturalDisaster,
    TerroristViolence,
    IndustrialTransport,
    Other,
}

impl EventType {
    /// Keyword rules checked in order against the lower-cased title
    const RULES: [(EventType, &'static [&'static str]); 5] = [
        (
            EventType::PandemicDisease,
            &["pandemic", "flu", "plague", "covid", "disease"],
        ),
        (EventType::Famine, &["famine", "hunger"]),
        (
            EventType::NaturalDisaster,
            &["earthquake", "flood", "storm", "hurricane"],
        ),
        (EventType::TerroristViolence, &["terrorist", "attack"]),
        (EventType::IndustrialTransport, &["fire", "accident", "crash"]),
    ];

    /// Classifies a page by its title
    pub fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        Self::RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
            .map(|(event_type, _)| *event_type)
            .unwrap_or(EventType::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PandemicDisease => "Pandemic/Disease",
            Self::Famine => "Famine",
            Self::NaturalDisaster => "Natural Disaster",
            Self::TerroristViolence => "Terrorist/Violence",
            Self::IndustrialTransport => "Industrial/Transport",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fields of a page file the analysis reads
#[derive(Debug, Deserialize)]
struct PageFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    external_links: Vec<serde_json::Value>,
}

/// Per page analysis result
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnalysis {
    pub title: String,
    pub summary: String,
    pub source_count: usize,
    pub filename: String,
    pub years: Vec<u32>,
    pub event_type: EventType,
    pub location: String,
}

impl PageAnalysis {
    /// Analyses one page from its title, summary and external link count
    pub fn new(title: &str, summary: &str, source_count: usize, filename: &str) -> Self {
        let text = format!("{} {}", title, summary);
        Self {
            title: title.to_string(),
            summary: summary.chars().take(SUMMARY_PREFIX_CHARS).collect(),
            source_count,
            filename: filename.to_string(),
            years: extract_years(&text),
            event_type: EventType::classify(title),
            location: extract_location(&text).to_string(),
        }
    }
}

/// Source count statistics across pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceMetrics {
    pub total: usize,
    pub average: usize,
    pub maximum: usize,
    pub minimum: usize,
}

/// Aggregated analysis of all pages
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub pages: Vec<PageAnalysis>,
    /// Decade (e.g. 1950) to number of pages whose earliest year falls in it
    pub timeline: BTreeMap<u32, usize>,
    pub types: HashMap<EventType, usize>,
    /// Location to page count, excluding unknown locations
    pub locations: HashMap<String, usize>,
    pub sources: SourceMetrics,
}

impl AnalysisSummary {
    /// Aggregates per page results
    pub fn from_pages(pages: Vec<PageAnalysis>) -> Self {
        let mut timeline = BTreeMap::new();
        let mut types = HashMap::new();
        let mut locations = HashMap::new();

        for page in &pages {
            if let Some(earliest) = page.years.iter().min() {
                *timeline.entry(earliest / 10 * 10).or_insert(0) += 1;
            }
            *types.entry(page.event_type).or_insert(0) += 1;
            if page.location != UNKNOWN_LOCATION {
                *locations.entry(page.location.clone()).or_insert(0) += 1;
            }
        }

        let counts: Vec<usize> = pages.iter().map(|p| p.source_count).collect();
        let total: usize = counts.iter().sum();
        let sources = SourceMetrics {
            total,
            average: if counts.is_empty() {
                0
            } else {
                (total as f64 / counts.len() as f64).round() as usize
            },
            maximum: counts.iter().copied().max().unwrap_or(0),
            minimum: counts.iter().copied().min().unwrap_or(0),
        };

        Self {
            pages,
            timeline,
            types,
            locations,
            sources,
        }
    }

    /// Event types by descending count, ties broken by label
    pub fn types_by_count(&self) -> Vec<(EventType, usize)> {
        let mut types: Vec<_> = self.types.iter().map(|(t, c)| (*t, *c)).collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        types
    }

    /// Locations by descending count, ties broken by name
    pub fn locations_by_count(&self) -> Vec<(String, usize)> {
        let mut locations: Vec<_> = self
            .locations
            .iter()
            .map(|(l, c)| (l.clone(), *c))
            .collect();
        locations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        locations
    }

    /// Share of pages, rounded to a whole percent
    fn percentage(&self, count: usize) -> usize {
        if self.pages.is_empty() {
            return 0;
        }
        (count as f64 / self.pages.len() as f64 * 100.0).round() as usize
    }

    /// Earliest and latest year mentioned by any page
    pub fn year_span(&self) -> Option<(u32, u32)> {
        let years = self.pages.iter().flat_map(|p| p.years.iter().copied());
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }
}

/// Unique four-digit years in order of first mention
pub fn extract_years(text: &str) -> Vec<u32> {
    let mut years = Vec::new();
    for caps in YEAR_RE.captures_iter(text) {
        let Some(year) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        if year > 1000 && year < 3000 && !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

/// First known place name mentioned in the text
pub fn extract_location(text: &str) -> &'static str {
    LOCATIONS
        .iter()
        .find(|location| text.contains(*location))
        .copied()
        .unwrap_or(UNKNOWN_LOCATION)
}

/// Loads and analyses every page file in a directory
///
/// The run index is skipped; unreadable files are logged and skipped.
pub fn load_pages(dir: &Path) -> OutputResult<Vec<PageAnalysis>> {
    if !dir.is_dir() {
        return Err(OutputError::NoPages(dir.display().to_string()));
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "json")
                && path.file_name().is_some_and(|name| name != INDEX_JSON)
        })
        .collect();
    files.sort();

    let mut pages = Vec::new();
    for path in files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parsed = fs::read_to_string(&path)
            .map_err(OutputError::from)
            .and_then(|content| {
                serde_json::from_str::<PageFile>(&content).map_err(OutputError::from)
            });

        match parsed {
            Ok(file) => pages.push(PageAnalysis::new(
                &file.title,
                &file.summary,
                file.external_links.len(),
                &filename,
            )),
            Err(e) => tracing::warn!("Could not analyze {}: {}", filename, e),
        }
    }

    if pages.is_empty() {
        return Err(OutputError::NoPages(dir.display().to_string()));
    }

    Ok(pages)
}

/// Analyses a page directory and writes all reports
///
/// # Arguments
///
/// * `pages_dir` - Directory holding harvested page JSON files
/// * `reports_dir` - Directory receiving the reports (created if missing)
///
/// # Returns
///
/// * `Ok(AnalysisSummary)` - The aggregated analysis
/// * `Err(OutputError)` - No pages were found or a report could not be written
pub fn run_analysis(pages_dir: &Path, reports_dir: &Path) -> OutputResult<AnalysisSummary> {
    let pages = load_pages(pages_dir)?;
    tracing::info!("Analyzed {} page files", pages.len());

    let summary = AnalysisSummary::from_pages(pages);
    write_reports(&summary, reports_dir)?;
    Ok(summary)
}

/// Writes the text report and the three CSV breakdowns
pub fn write_reports(summary: &AnalysisSummary, reports_dir: &Path) -> OutputResult<()> {
    fs::create_dir_all(reports_dir)?;

    fs::write(reports_dir.join(ANALYSIS_REPORT), format_analysis_report(summary))?;
    fs::write(reports_dir.join(EVENT_TYPES_CSV), format_types_csv(summary)?)?;
    fs::write(reports_dir.join(TIMELINE_CSV), format_timeline_csv(summary)?)?;
    fs::write(reports_dir.join(LOCATION_CSV), format_locations_csv(summary)?)?;

    tracing::info!("Analysis reports written to {}", reports_dir.display());
    Ok(())
}

/// Formats the main analysis report
pub fn format_analysis_report(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    write_analysis_report(&mut out, summary);
    out
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(63);
    out.push('\n');
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("{}\n", rule));
    out.push('\n');
}

fn write_analysis_report(out: &mut String, summary: &AnalysisSummary) {
    out.push_str("HARVEST DATA ANALYSIS REPORT\n");
    out.push_str(&format!(
        "Generated: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    banner(out, "OVERVIEW");
    out.push_str(&format!("- Total pages analyzed: {}\n", summary.pages.len()));
    out.push_str(&format!("- Total external sources: {}\n", summary.sources.total));
    out.push_str(&format!("- Average sources per page: {}\n", summary.sources.average));
    match summary.year_span() {
        Some((min, max)) => out.push_str(&format!("- Time period covered: {} - {}\n", min, max)),
        None => out.push_str("- Time period covered: n/a\n"),
    }

    banner(out, "EVENT TYPE BREAKDOWN");
    for (event_type, count) in summary.types_by_count() {
        out.push_str(&format!(
            "- {}: {} pages ({}%)\n",
            event_type,
            count,
            summary.percentage(count)
        ));
    }

    banner(out, "GEOGRAPHIC DISTRIBUTION");
    for (location, count) in summary.locations_by_count().into_iter().take(10) {
        out.push_str(&format!("- {}: {} pages\n", location, count));
    }

    banner(out, "HISTORICAL TIMELINE (Recent Decades)");
    for (decade, count) in summary
        .timeline
        .iter()
        .rev()
        .filter(|(decade, _)| **decade >= 1900)
        .take(15)
    {
        out.push_str(&format!("- {}s: {} pages\n", decade, count));
    }

    banner(out, "SOURCE METRICS");
    out.push_str(&format!("- Total external sources: {}\n", summary.sources.total));
    out.push_str(&format!("- Average per page: {}\n", summary.sources.average));
    out.push_str(&format!("- Highest source count: {}\n", summary.sources.maximum));
    out.push_str(&format!("- Lowest source count: {}\n", summary.sources.minimum));

    banner(out, "TOP PAGES BY SOURCE COUNT");
    let mut ranked: Vec<&PageAnalysis> = summary.pages.iter().collect();
    ranked.sort_by(|a, b| b.source_count.cmp(&a.source_count));
    for (i, page) in ranked.into_iter().take(10).enumerate() {
        out.push_str(&format!("{}. {}: {} sources\n", i + 1, page.title, page.source_count));
    }

    banner(out, "KEY INSIGHTS");
    if let Some((event_type, _)) = summary.types_by_count().first() {
        out.push_str(&format!("- Most documented type: {}\n", event_type));
    }
    if let Some((location, _)) = summary.locations_by_count().first() {
        out.push_str(&format!("- Geographic focus: {}\n", location));
    }
    out.push_str(&format!(
        "- Pages average {} external references\n",
        summary.sources.average
    ));
}

/// `Event_Type,Count,Percentage` by descending count
pub fn format_types_csv(summary: &AnalysisSummary) -> OutputResult<String> {
    let header = ["Event_Type", "Count", "Percentage"].map(String::from).to_vec();
    let rows = summary.types_by_count().into_iter().map(|(event_type, count)| {
        vec![
            event_type.to_string(),
            count.to_string(),
            format!("{}%", summary.percentage(count)),
        ]
    });
    csv_rows(std::iter::once(header).chain(rows), QuoteStyle::Necessary)
}

/// `Decade,Page_Count` in ascending decade order
pub fn format_timeline_csv(summary: &AnalysisSummary) -> OutputResult<String> {
    let header = ["Decade", "Page_Count"].map(String::from).to_vec();
    let rows = summary
        .timeline
        .iter()
        .map(|(decade, count)| vec![format!("{}s", decade), count.to_string()]);
    csv_rows(std::iter::once(header).chain(rows), QuoteStyle::Necessary)
}

/// `Location,Page_Count` by descending count
pub fn format_locations_csv(summary: &AnalysisSummary) -> OutputResult<String> {
    let header = ["Location", "Page_Count"].map(String::from).to_vec();
    let rows = summary
        .locations_by_count()
        .into_iter()
        .map(|(location, count)| vec![location, count.to_string()]);
    csv_rows(std::iter::once(header).chain(rows), QuoteStyle::Necessary)
}

/// Prints a short analysis summary to stdout
pub fn print_summary(summary: &AnalysisSummary, reports_dir: &Path) {
    println!("=== Analysis Summary ===\n");
    println!("  Pages analyzed: {}", summary.pages.len());
    println!("  External sources processed: {}", summary.sources.total);
    println!("  Event types identified: {}", summary.types.len());
    println!("\nReports saved in: {}", reports_dir.display());
    println!("  - {}", ANALYSIS_REPORT);
    println!("  - {}", EVENT_TYPES_CSV);
    println!("  - {}", TIMELINE_CSV);
    println!("  - {}", LOCATION_CSV);
}
