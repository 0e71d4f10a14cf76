//! Run statistics
//!
//! This module summarizes a finished run: links per engine, outcomes per
//! status class, adapter warnings, downloads and elapsed time.

use crate::model::{LinkResult, SourceEngine, StatusClass};
use crate::output::download::DownloadReport;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Summary of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the summary was taken
    pub finished_at: DateTime<Utc>,

    /// Total number of links reported
    pub total_links: usize,

    /// Count of links by engine
    pub links_by_engine: BTreeMap<SourceEngine, usize>,

    /// Count of links by status class
    pub links_by_class: BTreeMap<StatusClass, usize>,

    /// Number of engines that failed
    pub adapter_warnings: usize,

    /// Download counts, if downloading was enabled
    pub downloads: Option<DownloadReport>,
}

impl RunSummary {
    /// Builds a summary from the final results
    ///
    /// # Arguments
    ///
    /// * `started_at` - When the run started
    /// * `results` - The verified links
    /// * `adapter_warnings` - Number of engines that failed
    pub fn from_results(
        started_at: DateTime<Utc>,
        results: &[LinkResult],
        adapter_warnings: usize,
    ) -> Self {
        let mut links_by_engine = BTreeMap::new();
        let mut links_by_class = BTreeMap::new();

        for result in results {
            *links_by_engine.entry(result.source_engine()).or_insert(0) += 1;
            if let Some(status) = result.status() {
                *links_by_class.entry(status.status_class()).or_insert(0) += 1;
            }
        }

        Self {
            started_at,
            finished_at: Utc::now(),
            total_links: results.len(),
            links_by_engine,
            links_by_class,
            adapter_warnings,
            downloads: None,
        }
    }

    /// Attaches download counts and moves the finish time to now
    pub fn with_downloads(mut self, downloads: DownloadReport) -> Self {
        self.downloads = Some(downloads);
        self.finished_at = Utc::now();
        self
    }

    /// Elapsed run time in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Share of links that answered 2xx, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_links == 0 {
            return 0.0;
        }
        let ok = self
            .links_by_class
            .get(&StatusClass::Success)
            .copied()
            .unwrap_or(0);
        (ok as f64 / self.total_links as f64) * 100.0
    }

    /// Formats the summary as text lines
    pub fn format_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format!(
            "Run started {} and took {:.1}s",
            self.started_at.to_rfc3339(),
            self.duration_seconds()
        ));
        lines.push(format!("Links found: {}", self.total_links));

        for (engine, count) in &self.links_by_engine {
            lines.push(format!("  {}: {}", engine, count));
        }

        lines.push("Links by status:".to_string());
        for (class, count) in &self.links_by_class {
            lines.push(format!("  {}: {}", class.label(), count));
        }
        lines.push(format!("Success rate: {:.1}%", self.success_rate()));

        if self.adapter_warnings > 0 {
            lines.push(format!("Engines failed: {}", self.adapter_warnings));
        }

        if let Some(downloads) = &self.downloads {
            lines.push(format!(
                "Downloads: {} saved, {} failed, {} skipped",
                downloads.saved, downloads.failed, downloads.skipped
            ));
        }

        lines
    }
}

/// Logs the summary at info level
pub fn log_summary(summary: &RunSummary) {
    tracing::info!("=== Fossick Summary ===");
    for line in summary.format_lines() {
        tracing::info!("{}", line);
    }
}
