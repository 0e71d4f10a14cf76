//! Output sink trait and errors
//!
//! This module defines the interface every renderer of the final result
//! sequence implements.

use crate::model::LinkResult;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column order shared by every tabular renderer
pub const RECORD_FIELDS: [&str; 4] = ["title", "url", "source_engine", "status"];

/// Trait for output sinks
///
/// A sink receives the complete, verified result sequence once, at the
/// end of a run.
pub trait OutputSink {
    /// Renders the results
    ///
    /// # Arguments
    ///
    /// * `results` - Verified links in final order
    fn write(&mut self, results: &[LinkResult]) -> OutputResult<()>;
}

/// Flattens a result into the output record shape
///
/// Field order matches [`RECORD_FIELDS`]. An unverified result renders an
/// empty status.
pub fn record_fields(result: &LinkResult) -> [String; 4] {
    [
        result.title().to_string(),
        result.url().to_string(),
        result.source_engine().name().to_string(),
        result.status().map(|s| s.to_string()).unwrap_or_default(),
    ]
}
