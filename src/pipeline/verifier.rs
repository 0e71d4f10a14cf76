//! Link liveness probing
//!
//! Every link gets exactly one outcome: the status code of the first
//! usable response, or an unreachable marker describing why no response
//! was obtained. Nothing is retried.
//!
//! # Request Flow
//!
//! | Condition | Action |
//! |-----------|--------|
//! | URL not absolute http(s) | Unreachable (malformed_url), no request |
//! | HEAD answers 400/403/405/501 | Fall back to GET, record GET status |
//! | HEAD answers anything else | Record that status |
//! | HEAD times out | Unreachable (timeout) |
//! | HEAD cannot connect | Unreachable (dns / connection_refused / other) |
//! | HEAD fails mid-protocol | Fall back to GET |

use crate::model::{HttpStatusOutcome, LinkResult, ProbeFailure};
use crate::url::parse_absolute_url;
use reqwest::Client;
use std::error::Error as StdError;

/// HEAD response codes that indicate the server rejects HEAD itself
const HEAD_REJECTED: &[u16] = &[400, 403, 405, 501];

/// Error-chain fragments produced by failed name resolution
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
];

/// Error-chain fragments produced by refused or dropped connections
const REFUSED_MARKERS: &[&str] = &["connection refused", "actively refused", "connection reset"];

/// Probes links and attaches their status outcome
#[derive(Debug, Clone)]
pub struct LinkVerifier {
    client: Client,
}

impl LinkVerifier {
    /// Creates a verifier using the given probe client
    ///
    /// The client's timeout bounds every probe; see
    /// [`build_probe_client`](crate::pipeline::build_probe_client).
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Probes the link and returns it with `status` populated
    ///
    /// Never fails: network problems are recorded as
    /// [`HttpStatusOutcome::Unreachable`].
    pub async fn verify(&self, result: LinkResult) -> LinkResult {
        let outcome = self.probe(result.url()).await;
        tracing::debug!(url = result.url(), status = %outcome, "Link probed");
        result.into_verified(outcome)
    }

    /// Probes a URL and returns the outcome
    pub async fn probe(&self, url: &str) -> HttpStatusOutcome {
        if let Err(e) = parse_absolute_url(url) {
            return HttpStatusOutcome::unreachable(ProbeFailure::MalformedUrl, e.to_string());
        }

        match self.client.head(url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                if HEAD_REJECTED.contains(&code) {
                    tracing::trace!(url, code, "HEAD rejected, falling back to GET");
                    self.probe_with_get(url).await
                } else {
                    HttpStatusOutcome::Status(code)
                }
            }
            Err(e) if e.is_timeout() || e.is_connect() || e.is_builder() => {
                classify_probe_error(&e)
            }
            Err(e) => {
                tracing::trace!(url, error = %e, "HEAD failed, falling back to GET");
                self.probe_with_get(url).await
            }
        }
    }

    async fn probe_with_get(&self, url: &str) -> HttpStatusOutcome {
        match self.client.get(url).send().await {
            Ok(response) => HttpStatusOutcome::Status(response.status().as_u16()),
            Err(e) => classify_probe_error(&e),
        }
    }
}

/// Maps a request error to an unreachable outcome
fn classify_probe_error(error: &reqwest::Error) -> HttpStatusOutcome {
    let detail = error_chain(error);

    let cause = if error.is_timeout() {
        ProbeFailure::Timeout
    } else if error.is_builder() {
        ProbeFailure::MalformedUrl
    } else {
        let lower = detail.to_ascii_lowercase();
        if DNS_MARKERS.iter().any(|m| lower.contains(m)) {
            ProbeFailure::Dns
        } else if REFUSED_MARKERS.iter().any(|m| lower.contains(m)) {
            ProbeFailure::ConnectionRefused
        } else {
            ProbeFailure::Other
        }
    };

    HttpStatusOutcome::unreachable(cause, detail)
}

/// Joins an error and all of its sources into one line
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = inner.source();
    }
    parts.join(": ")
}
