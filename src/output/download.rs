//! Local download of linked content
//!
//! The download sink is independent of the console/CSV output: it runs
//! after rendering and stores the body of every link that answered 2xx.
//! A failed download is logged and counted, never fatal.

use crate::model::LinkResult;
use crate::output::traits::OutputResult;
use crate::pipeline::fetch_body;
use crate::url::download_file_name;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Counts for one download pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Files written
    pub saved: usize,

    /// Links skipped because they did not answer 2xx
    pub skipped: usize,

    /// Links whose download or write failed
    pub failed: usize,
}

/// Stores link content under a directory
pub struct DownloadSink {
    client: Client,
    dir: PathBuf,
}

impl DownloadSink {
    /// Creates a sink writing into `dir`
    pub fn new(client: Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    /// Returns the target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads every reachable link, one at a time
    ///
    /// # Returns
    ///
    /// * `Ok(DownloadReport)` - Per-link counts
    /// * `Err(OutputError)` - The target directory could not be created
    pub async fn download_all(&self, results: &[LinkResult]) -> OutputResult<DownloadReport> {
        let mut report = DownloadReport::default();

        let reachable: Vec<&LinkResult> = results
            .iter()
            .filter(|r| r.status().map(|s| s.is_success()).unwrap_or(false))
            .collect();
        report.skipped = results.len() - reachable.len();

        if reachable.is_empty() {
            tracing::info!("[i] No reachable links to download");
            return Ok(report);
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        for result in reachable {
            match self.download_one(result).await {
                Ok(path) => {
                    tracing::debug!("Saved {} to {}", result.url(), path.display());
                    report.saved += 1;
                }
                Err(e) => {
                    tracing::warn!("[!] Failed to download {}: {}", result.url(), e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "[i] Downloaded {} files to {} ({} failed, {} skipped)",
            report.saved,
            self.dir.display(),
            report.failed,
            report.skipped
        );

        Ok(report)
    }

    async fn download_one(&self, result: &LinkResult) -> Result<PathBuf, crate::FossickError> {
        let body = fetch_body(&self.client, result.url()).await?;
        let path = self.dir.join(download_file_name(result.url()));
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }
}
