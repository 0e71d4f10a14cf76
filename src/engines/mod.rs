//! Search provider adapters
//!
//! Each adapter wraps one search API, pages through its results and maps
//! the provider's JSON schema into [`LinkResult`] records. This module
//! holds the shared pieces:
//! - The [`SearchProvider`] trait the aggregator drives
//! - Request sending with transport error mapping
//! - HTTP error classification (auth, quota, transport)
//! - Entry normalization with required-field checks

mod general;
mod web;

pub use general::GeneralSearchAdapter;
pub use web::WebSearchAdapter;

use crate::model::{LinkResult, SourceEngine};
use crate::url::parse_absolute_url;
use crate::{AdapterError, AdapterResult};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Longest slice of a raw error body kept in error messages
const MAX_ERROR_BODY_LEN: usize = 200;

/// Body fragments that mark a 401/403 as quota exhaustion rather than bad credentials
const QUOTA_MARKERS: &[&str] = &[
    "quota",
    "ratelimit",
    "rate limit",
    "limitexceeded",
    "outofcallvolume",
];

/// A search engine adapter
///
/// Implementations own their credentials, endpoint and result cap; the
/// aggregator only supplies the query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns which engine this adapter represents
    fn engine(&self) -> SourceEngine;

    /// Runs the query against the provider, following pagination
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LinkResult>)` - Unverified links in provider order
    /// * `Err(AdapterError)` - Auth, quota, transport or malformed response failure
    async fn fetch(&self, query: &str) -> AdapterResult<Vec<LinkResult>>;
}

/// Sends a search API request and returns the body of a successful response
pub(crate) async fn send_search_request(
    engine: SourceEngine,
    request: RequestBuilder,
) -> AdapterResult<String> {
    // Strip the URL from errors: query strings may carry API keys
    let response = request
        .send()
        .await
        .map_err(|e| AdapterError::Transport {
            engine,
            message: e.without_url().to_string(),
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| AdapterError::Transport {
        engine,
        message: format!("failed to read response body: {}", e.without_url()),
    })?;

    if !status.is_success() {
        return Err(classify_error_response(engine, status, &body));
    }

    Ok(body)
}

/// Body fragments that mark a 400 as a rejected API key
const INVALID_KEY_MARKERS: &[&str] = &["api_key_invalid", "keyinvalid", "api key not valid"];

/// Maps a non-success search API response to an adapter error
///
/// | Condition | Error |
/// |-----------|-------|
/// | HTTP 429 | Quota |
/// | HTTP 401/403 naming a quota or rate limit | Quota |
/// | HTTP 401/403 otherwise | Auth |
/// | HTTP 400 naming an invalid API key | Auth |
/// | Anything else | Transport |
pub(crate) fn classify_error_response(
    engine: SourceEngine,
    status: StatusCode,
    body: &str,
) -> AdapterError {
    let message = error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });

    match status {
        StatusCode::TOO_MANY_REQUESTS => AdapterError::Quota {
            engine,
            status: status.as_u16(),
            message,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if mentions_quota(body) => {
            AdapterError::Quota {
                engine,
                status: status.as_u16(),
                message,
            }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdapterError::Auth {
            engine,
            status: status.as_u16(),
            message,
        },
        StatusCode::BAD_REQUEST if mentions_invalid_key(body) => AdapterError::Auth {
            engine,
            status: status.as_u16(),
            message,
        },
        _ => AdapterError::Transport {
            engine,
            message: format!("HTTP {}: {}", status.as_u16(), message),
        },
    }
}

/// Deserializes a provider response body
pub(crate) fn parse_json<T: DeserializeOwned>(engine: SourceEngine, body: &str) -> AdapterResult<T> {
    serde_json::from_str(body).map_err(|e| AdapterError::MalformedResponse {
        engine,
        message: format!("invalid JSON payload: {}", e),
    })
}

/// Builds a [`LinkResult`] from one provider entry
///
/// The URL is required and must be an absolute http(s) URL; a missing
/// title becomes an empty string.
pub(crate) fn normalize_entry(
    engine: SourceEngine,
    title: Option<String>,
    url: Option<String>,
) -> AdapterResult<LinkResult> {
    let raw_url = url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AdapterError::MalformedResponse {
            engine,
            message: "result entry is missing its url".to_string(),
        })?;

    let parsed = parse_absolute_url(&raw_url).map_err(|e| AdapterError::MalformedResponse {
        engine,
        message: format!("result url '{}' is not usable: {}", raw_url, e),
    })?;

    let title = title.map(|t| t.trim().to_string()).unwrap_or_default();

    Ok(LinkResult::new(title, parsed.as_str(), engine))
}

/// Error envelopes used by both providers
///
/// Google: `{"error": {"message": .., "errors": [{"reason": ..}]}}`
/// Bing: `{"errors": [{"code": .., "message": ..}]}` or `{"error": {"message": ..}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let message = envelope
            .error
            .and_then(|e| e.message)
            .or_else(|| envelope.errors.into_iter().find_map(|e| e.message));
        if message.is_some() {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_ERROR_BODY_LEN).collect())
    }
}

fn mentions_quota(body: &str) -> bool {
    mentions_any(body, QUOTA_MARKERS)
}

fn mentions_invalid_key(body: &str) -> bool {
    mentions_any(body, INVALID_KEY_MARKERS)
}

fn mentions_any(body: &str, markers: &[&str]) -> bool {
    let lower = body.to_ascii_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unauthorized() {
        let body = r#"{"error":{"code":"401","message":"Access denied due to invalid subscription key."}}"#;
        let err = classify_error_response(SourceEngine::Web, StatusCode::UNAUTHORIZED, body);
        match err {
            AdapterError::Auth {
                engine,
                status,
                message,
            } => {
                assert_eq!(engine, SourceEngine::Web);
                assert_eq!(status, 401);
                assert!(message.contains("invalid subscription key"));
            }
            other => panic!("expected Auth, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_invalid_api_key() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        let err = classify_error_response(SourceEngine::General, StatusCode::BAD_REQUEST, body);
        match err {
            AdapterError::Auth {
                engine,
                status,
                message,
            } => {
                assert_eq!(engine, SourceEngine::General);
                assert_eq!(status, 400);
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected Auth, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_bad_request_is_transport() {
        let body = r#"{"error":{"code":400,"message":"Invalid Value","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_error_response(SourceEngine::General, StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AdapterError::Transport { .. }));
    }

    #[test]
    fn test_classify_forbidden_quota() {
        let body = r#"{"error":{"code":403,"message":"Quota exceeded for quota metric 'Queries'","errors":[{"reason":"rateLimitExceeded"}]}}"#;
        let err = classify_error_response(SourceEngine::General, StatusCode::FORBIDDEN, body);
        assert!(matches!(err, AdapterError::Quota { status: 403, .. }));
    }

    #[test]
    fn test_classify_forbidden_auth() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission"}}"#;
        let err = classify_error_response(SourceEngine::General, StatusCode::FORBIDDEN, body);
        assert!(matches!(err, AdapterError::Auth { status: 403, .. }));
    }

    #[test]
    fn test_classify_too_many_requests() {
        let err = classify_error_response(SourceEngine::Web, StatusCode::TOO_MANY_REQUESTS, "");
        match err {
            AdapterError::Quota { message, .. } => assert_eq!(message, "Too Many Requests"),
            other => panic!("expected Quota, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_server_error_is_transport() {
        let err = classify_error_response(
            SourceEngine::Web,
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded",
        );
        match err {
            AdapterError::Transport { message, .. } => {
                assert_eq!(message, "HTTP 500: upstream exploded")
            }
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message_from_bing_errors_array() {
        let body = r#"{"_type":"ErrorResponse","errors":[{"code":"InvalidRequest","message":"Parameter has invalid value."}]}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Parameter has invalid value.")
        );
    }

    #[test]
    fn test_error_message_truncates_raw_body() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(&body).map(|m| m.len()), Some(MAX_ERROR_BODY_LEN));
    }

    #[test]
    fn test_normalize_entry() {
        let result = normalize_entry(
            SourceEngine::General,
            Some("  Rust Language  ".to_string()),
            Some("https://www.rust-lang.org/".to_string()),
        )
        .unwrap();

        assert_eq!(result.title(), "Rust Language");
        assert_eq!(result.url(), "https://www.rust-lang.org/");
        assert_eq!(result.source_engine(), SourceEngine::General);
        assert!(result.status().is_none());
    }

    #[test]
    fn test_normalize_entry_missing_title() {
        let result =
            normalize_entry(SourceEngine::Web, None, Some("https://example.com/".to_string()))
                .unwrap();
        assert_eq!(result.title(), "");
    }

    #[test]
    fn test_normalize_entry_missing_url() {
        let err = normalize_entry(SourceEngine::Web, Some("t".to_string()), None).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedResponse { .. }));

        let err = normalize_entry(SourceEngine::Web, None, Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedResponse { .. }));
    }

    #[test]
    fn test_normalize_entry_relative_url() {
        let err =
            normalize_entry(SourceEngine::General, None, Some("/relative".to_string())).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::MalformedResponse {
                engine: SourceEngine::General,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_json_error() {
        let result: AdapterResult<serde_json::Value> = parse_json(SourceEngine::Web, "<html>");
        assert!(matches!(result, Err(AdapterError::MalformedResponse { .. })));
    }
}
