//! Configuration module for Fossick
//!
//! This module handles the optional TOML settings file and combines it
//! with command-line values into an immutable [`SearchConfig`].
//!
//! # Example
//!
//! ```no_run
//! use fossick::config::{load_config_or_default, SearchConfig, SearchOptions};
//! use std::path::Path;
//!
//! let settings = load_config_or_default(Some(Path::new("fossick.toml"))).unwrap();
//! let options = SearchOptions {
//!     search_query: "rust async".to_string(),
//!     bing_key: Some("subscription-key".to_string()),
//!     ..Default::default()
//! };
//! let config = SearchConfig::new(options, settings).unwrap();
//! println!("Engines: {:?}", config.eligible_engines());
//! ```

mod parser;
mod search;
mod types;
mod validation;

// Re-export types
pub use search::{GeneralCredentials, OutputMode, SearchConfig, SearchOptions, WebCredentials};
pub use types::{
    FileConfig, GeneralEngineConfig, HttpConfig, OutputConfig, WebEngineConfig,
    DEFAULT_GENERAL_ENDPOINT, DEFAULT_WEB_ENDPOINT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
