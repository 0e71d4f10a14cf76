//! HTTP client construction and content fetching
//!
//! This module builds the two HTTP clients used by a run:
//! - The search client, used by the provider adapters
//! - The probe client, used for link checks and downloads
//!
//! It also fetches link bodies for the download sink.

use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Upper bound on connection establishment, never longer than the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops followed when probing or downloading a link
const MAX_REDIRECTS: usize = 10;

/// Builds the HTTP client used for search API requests
///
/// # Arguments
///
/// * `config` - The HTTP settings
///
/// # Example
///
/// ```no_run
/// use fossick::config::HttpConfig;
/// use fossick::pipeline::build_search_client;
///
/// let client = build_search_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_search_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.search_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the HTTP client used for link probes and downloads
///
/// Redirects are followed so that the recorded status is the one of the
/// final destination.
pub fn build_probe_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.probe_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the body of a link
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The response body of a 2xx response
/// * `Err(reqwest::Error)` - Network failure or non-success status
pub async fn fetch_body(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(body.to_vec())
}
