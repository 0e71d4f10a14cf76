//! Console rendering of results

use crate::model::LinkResult;
use crate::output::traits::{OutputResult, OutputSink};
use std::io::{self, Stdout, Write};

/// Writes one human-readable block per result
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<Stdout> {
    /// Creates a sink writing to standard output
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink writing to an arbitrary writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink and returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn write(&mut self, results: &[LinkResult]) -> OutputResult<()> {
        if results.is_empty() {
            writeln!(self.out, "[i] No results returned")?;
        }

        for result in results {
            self.out.write_all(format_result(result).as_bytes())?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Formats a single result as a console block
pub fn format_result(result: &LinkResult) -> String {
    let status = match result.status() {
        Some(outcome) if outcome.code().is_some() => format!("HTTP {}", outcome),
        Some(outcome) => outcome.to_string(),
        None => "not checked".to_string(),
    };

    format!(
        "[i] Found Link : {}\n    Title : {}\n    Status : {}\n    Search Engine : {}\n",
        result.url(),
        result.title(),
        status,
        result.source_engine()
    )
}
