//! Filesystem output sink

use crate::config::OutputConfig;
use crate::model::{PageRecord, RunIndex};
use crate::output::{
    clean_filename, format_index_csv, format_page_report, format_run_report, format_tables_csv,
    write_json, OutputHandler, OutputResult, INDEX_CSV, INDEX_JSON, RUN_REPORT,
};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Writes page files as they arrive and the run index at the end
///
/// Per page: `{stem}.json`, plus `{stem}.csv` and `{stem}_report.txt` when
/// enabled. Per run: `MASTER_INDEX.json`, `MASTER_INDEX.csv` and optionally
/// `RUN_REPORT.txt`.
///
/// Stems are unique within one run: a second page whose title cleans to an
/// already used stem is stored as `{stem}_2`, `{stem}_3` and so on. Files
/// left by earlier runs are overwritten. If any file of a page fails to
/// write, the files already written for that page are removed.
pub struct FileOutputHandler {
    dir: PathBuf,
    options: OutputConfig,
    stems: HashSet<String>,
}

impl FileOutputHandler {
    /// Creates the handler, creating the output directory if needed
    ///
    /// # Arguments
    ///
    /// * `options` - Output configuration naming the directory and optional files
    pub fn new(options: OutputConfig) -> OutputResult<Self> {
        let dir = PathBuf::from(&options.output_dir);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            tracing::info!("Created output directory: {}", dir.display());
        }
        Ok(Self {
            dir,
            options,
            stems: HashSet::new(),
        })
    }

    /// First stem for `title` not yet used in this run
    fn unique_stem(&self, title: &str) -> String {
        let base = clean_filename(title);
        let mut stem = base.clone();
        let mut n = 2;
        while self.stems.contains(&stem) {
            stem = format!("{}_{}", base, n);
            n += 1;
        }
        stem
    }

    /// Writes every file of one page, pushing each path once it exists
    fn write_page_files(
        &self,
        page: &PageRecord,
        stem: &str,
        written: &mut Vec<PathBuf>,
    ) -> OutputResult<()> {
        let json_path = self.dir.join(format!("{}.json", stem));
        write_json(&json_path, page)?;
        written.push(json_path);

        if self.options.enhanced_csv {
            if page.tables.is_empty() {
                tracing::debug!("No tables on '{}', skipping table CSV", page.title);
            } else {
                let csv_path = self.dir.join(format!("{}.csv", stem));
                fs::write(&csv_path, format_tables_csv(page)?)?;
                written.push(csv_path);
            }
        }

        if self.options.page_reports {
            let report_path = self.dir.join(format!("{}_report.txt", stem));
            fs::write(&report_path, format_page_report(page))?;
            written.push(report_path);
        }

        Ok(())
    }
}

impl OutputHandler for FileOutputHandler {
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<String> {
        let stem = self.unique_stem(&page.title);
        if stem != clean_filename(&page.title) {
            tracing::warn!("Title '{}' already saved in this run, using {}", page.title, stem);
        }

        let mut written = Vec::new();
        if let Err(e) = self.write_page_files(page, &stem, &mut written) {
            for path in &written {
                if let Err(remove_err) = fs::remove_file(path) {
                    tracing::warn!("Could not remove {}: {}", path.display(), remove_err);
                }
            }
            return Err(e);
        }

        tracing::info!("Saved: {}.json", stem);
        self.stems.insert(stem.clone());
        Ok(stem)
    }

    fn finalize(&mut self, index: &RunIndex) -> OutputResult<()> {
        write_json(&self.dir.join(INDEX_JSON), index)?;
        fs::write(self.dir.join(INDEX_CSV), format_index_csv(index)?)?;

        if self.options.run_report {
            fs::write(self.dir.join(RUN_REPORT), format_run_report(index))?;
        }

        tracing::info!(
            "Run index saved with {} pages ({} errors)",
            index.successful_pages,
            index.errors
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowRecord, TableRecord};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::path::Path;
    use tempfile::tempdir;

    fn page(title: &str, url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: title.to_string(),
            summary: String::new(),
            infobox: BTreeMap::new(),
            sections: vec![],
            external_links: vec![],
            references: vec![],
            tables: vec![TableRecord {
                index: 0,
                headers: vec!["Name".to_string()],
                rows: vec![RowRecord::default()],
            }],
            categories: vec![],
            coordinates: None,
            scraped_at: Utc::now(),
        }
    }

    fn handler(dir: &Path) -> FileOutputHandler {
        FileOutputHandler::new(OutputConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            ..OutputConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_record_page_writes_all_files() {
        let dir = tempdir().unwrap();
        let mut output = handler(dir.path());

        let stem = output
            .record_page(&page("Tay Bridge disaster", "https://en.wikipedia.org/wiki/A"))
            .unwrap();

        assert_eq!(stem, "Tay_Bridge_disaster");
        for name in [
            "Tay_Bridge_disaster.json",
            "Tay_Bridge_disaster.csv",
            "Tay_Bridge_disaster_report.txt",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }
    }

    #[test]
    fn test_record_page_same_title_gets_new_stem() {
        let dir = tempdir().unwrap();
        let mut output = handler(dir.path());

        let first = output
            .record_page(&page("Tay Bridge", "https://en.wikipedia.org/wiki/Tay_Bridge"))
            .unwrap();
        let second = output
            .record_page(&page("Tay Bridge", "https://en.wikipedia.org/wiki/Tay_Rail_Bridge"))
            .unwrap();

        assert_eq!(first, "Tay_Bridge");
        assert_eq!(second, "Tay_Bridge_2");
        let stored = crate::output::read_page(&dir.path().join("Tay_Bridge.json")).unwrap();
        assert_eq!(stored.url, "https://en.wikipedia.org/wiki/Tay_Bridge");
        assert!(dir.path().join("Tay_Bridge_2.json").exists());
    }

    #[test]
    fn test_record_page_failure_removes_written_files() {
        let dir = tempdir().unwrap();
        let mut output = handler(dir.path());
        fs::create_dir(dir.path().join("Blocked_report.txt")).unwrap();

        let result = output.record_page(&page("Blocked", "https://en.wikipedia.org/wiki/Blocked"));

        assert!(result.is_err());
        assert!(!dir.path().join("Blocked.json").exists());
        assert!(!dir.path().join("Blocked.csv").exists());
    }
}
