//! CSV rendering of results
//!
//! Columns: `title,url,source_engine,status`. Quoting is delegated to the
//! `csv` crate since provider titles routinely contain commas and quotes.

use crate::model::LinkResult;
use crate::output::traits::{record_fields, OutputResult, OutputSink, RECORD_FIELDS};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes results to a CSV file
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink for the given file path
    ///
    /// The file is created (or truncated) on write, along with any missing
    /// parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for CsvSink {
    fn write(&mut self, results: &[LinkResult]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(&self.path)?;
        write_csv(file, results)?;

        tracing::info!(
            "[i] Saved {} results to CSV file {}",
            results.len(),
            self.path().display()
        );
        Ok(())
    }
}

/// Writes the header and one row per result to any writer
pub fn write_csv<W: Write>(writer: W, results: &[LinkResult]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(RECORD_FIELDS)?;
    for result in results {
        writer.write_record(record_fields(result))?;
    }

    writer.flush()?;
    Ok(())
}
