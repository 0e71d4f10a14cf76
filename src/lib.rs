//! Fossick: search engine link prospector
//!
//! This crate queries web search APIs with a single query, collects the
//! returned links, checks the HTTP status of each one and renders the
//! results to the console or a CSV file.

pub mod config;
pub mod engines;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Fossick operations
#[derive(Debug, Error)]
pub enum FossickError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No results: every configured search engine failed ({0})")]
    NoResults(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("At least one search engine must be configured (--bing-key, or --google-api with --google-cse)")]
    MissingEngine,
}

/// Errors raised by a single search provider adapter
///
/// These never abort a run on their own: the aggregator logs them and
/// continues with the remaining engines.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{engine} rejected the supplied credentials (HTTP {status}): {message}")]
    Auth {
        engine: model::SourceEngine,
        status: u16,
        message: String,
    },

    #[error("{engine} quota or rate limit exhausted (HTTP {status}): {message}")]
    Quota {
        engine: model::SourceEngine,
        status: u16,
        message: String,
    },

    #[error("{engine} request failed: {message}")]
    Transport {
        engine: model::SourceEngine,
        message: String,
    },

    #[error("{engine} returned a malformed response: {message}")]
    MalformedResponse {
        engine: model::SourceEngine,
        message: String,
    },
}

impl AdapterError {
    /// Returns the engine whose adapter produced this error
    pub fn engine(&self) -> model::SourceEngine {
        match self {
            Self::Auth { engine, .. }
            | Self::Quota { engine, .. }
            | Self::Transport { engine, .. }
            | Self::MalformedResponse { engine, .. } => *engine,
        }
    }
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Fossick operations
pub type Result<T> = std::result::Result<T, FossickError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::SearchConfig;
pub use model::{HttpStatusOutcome, LinkResult, ProbeFailure, SourceEngine};
pub use pipeline::{run, LinkVerifier, ResultAggregator};
