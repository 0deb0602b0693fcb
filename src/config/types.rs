use serde::Deserialize;

/// Main configuration structure for Wiki-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Fetch and pacing behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Prefix used to absolutise in-page `/wiki/` links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Fixed delay between consecutive requests (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of sourced addresses processed in one run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            delay_ms: 2000,
            timeout_secs: 10,
            max_pages: 50,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    pub name: String,

    /// Version of the harvester
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "WikiHarvest".to_string(),
            version: "1.0".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the identifying header value
    pub fn header_value(&self) -> String {
        format!("Mozilla/5.0 (compatible; {}/{})", self.name, self.version)
    }
}

/// Where input addresses come from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for previously written JSON files with link fields
    #[serde(rename = "source-dir")]
    pub source_dir: String,

    /// A single literal address; takes precedence over `source-dir`
    #[serde(rename = "seed-url")]
    pub seed_url: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source_dir: ".".to_string(),
            seed_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving page files and the run index
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Write a per page table CSV with flattened reference columns
    #[serde(rename = "enhanced-csv")]
    pub enhanced_csv: bool,

    /// Write a per page plain-text report
    #[serde(rename = "page-reports")]
    pub page_reports: bool,

    /// Write a plain-text report for the whole run
    #[serde(rename = "run-report")]
    pub run_report: bool,

    /// Directory receiving the analysis reports
    #[serde(rename = "reports-dir")]
    pub reports_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "crawled_pages".to_string(),
            enhanced_csv: true,
            page_reports: true,
            run_report: true,
            reports_dir: "ANALYSIS_REPORTS".to_string(),
        }
    }
}
