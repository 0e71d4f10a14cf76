//! Output module for rendering run results
//!
//! This module handles:
//! - Rendering results to the console or a CSV file
//! - Downloading linked content locally
//! - Summarizing a run

mod console;
mod csv_output;
mod download;
pub mod stats;
mod traits;

pub use console::{format_result, ConsoleSink};
pub use csv_output::{write_csv, CsvSink};
pub use download::{DownloadReport, DownloadSink};
pub use stats::{log_summary, RunSummary};
pub use traits::{record_fields, OutputError, OutputResult, OutputSink, RECORD_FIELDS};

use crate::config::{OutputMode, SearchConfig};

/// Creates the sink selected by the configuration's output mode
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// A boxed sink: [`CsvSink`] for `--write-csv`, otherwise [`ConsoleSink`]
pub fn sink_for(config: &SearchConfig) -> Box<dyn OutputSink> {
    match config.output_mode() {
        OutputMode::Csv { path } => Box::new(CsvSink::new(path.clone())),
        OutputMode::Console => Box::new(ConsoleSink::stdout()),
    }
}
