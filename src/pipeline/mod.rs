//! Search pipeline
//!
//! This module contains the core run logic, including:
//! - HTTP client construction for search and probe requests
//! - Link verification (HEAD with GET fallback)
//! - Aggregation of adapter output with partial-failure tolerance

mod aggregator;
mod fetcher;
mod verifier;

pub use aggregator::{AggregateReport, ResultAggregator};
pub use fetcher::{build_probe_client, build_search_client, fetch_body};
pub use verifier::LinkVerifier;

use crate::config::SearchConfig;
use crate::model::LinkResult;
use crate::FossickError;

/// Runs a complete search for the configured query
///
/// This is the main entry point. It will:
/// 1. Build one adapter per engine with credentials
/// 2. Query each engine in turn (web before general)
/// 3. Probe every collected link
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(Vec<LinkResult>)` - Verified links; failed engines are logged as warnings
/// * `Err(FossickError)` - Every engine failed
pub async fn run(config: &SearchConfig) -> Result<Vec<LinkResult>, FossickError> {
    let aggregator = ResultAggregator::from_config(config)?;
    let report = aggregator.run(config.query()).await?;
    Ok(report.results)
}
