use crate::config::types::FileConfig;
use crate::config::validation::validate;
use crate::model::SourceEngine;
use crate::ConfigError;
use std::fmt;
use std::path::PathBuf;

/// Raw command-line values before validation
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub search_query: String,
    pub google_api: Option<String>,
    pub google_cse: Option<String>,
    pub bing_key: Option<String>,
    pub write_csv: bool,
    pub download: bool,
}

/// Credentials for the web-search (Bing) engine
#[derive(Clone, PartialEq, Eq)]
pub struct WebCredentials {
    pub subscription_key: String,
}

/// Credentials for the general search (Google CSE) engine
///
/// Only constructed when both the API key and the engine ID are present.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneralCredentials {
    pub api_key: String,
    pub engine_id: String,
}

// Keys never appear in logs or error output
impl fmt::Debug for WebCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCredentials")
            .field("subscription_key", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for GeneralCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneralCredentials")
            .field("api_key", &"<redacted>")
            .field("engine_id", &"<redacted>")
            .finish()
    }
}

/// Where the final result sequence is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable blocks on stdout
    Console,
    /// A CSV file at the given path
    Csv { path: PathBuf },
}

/// Immutable snapshot of all settings for one run
///
/// Built once at startup from the command line and the optional config
/// file; there are no setters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    query: String,
    web: Option<WebCredentials>,
    general: Option<GeneralCredentials>,
    output_mode: OutputMode,
    download: bool,
    settings: FileConfig,
}

impl SearchConfig {
    /// Builds a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SearchConfig)` - Settings are valid and at least one engine is usable
    /// * `Err(ConfigError)` - Empty query, invalid file settings, or no engine credentials
    pub fn new(options: SearchOptions, settings: FileConfig) -> Result<Self, ConfigError> {
        validate(&settings)?;

        let query = options.search_query.trim().to_string();
        if query.is_empty() {
            return Err(ConfigError::Validation(
                "search query cannot be empty".to_string(),
            ));
        }

        let web = non_empty(options.bing_key).map(|subscription_key| WebCredentials {
            subscription_key,
        });

        let general = match (non_empty(options.google_api), non_empty(options.google_cse)) {
            (Some(api_key), Some(engine_id)) => Some(GeneralCredentials { api_key, engine_id }),
            (Some(_), None) | (None, Some(_)) => {
                tracing::debug!("Google search needs both --google-api and --google-cse, skipping");
                None
            }
            (None, None) => None,
        };

        if web.is_none() && general.is_none() {
            return Err(ConfigError::MissingEngine);
        }

        let output_mode = if options.write_csv {
            OutputMode::Csv {
                path: PathBuf::from(&settings.output.csv_path),
            }
        } else {
            OutputMode::Console
        };

        Ok(Self {
            query,
            web,
            general,
            output_mode,
            download: options.download,
            settings,
        })
    }

    /// The search query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Web-search credentials, if supplied
    pub fn web_credentials(&self) -> Option<&WebCredentials> {
        self.web.as_ref()
    }

    /// General search credentials, if both parts were supplied
    pub fn general_credentials(&self) -> Option<&GeneralCredentials> {
        self.general.as_ref()
    }

    /// Where results are rendered
    pub fn output_mode(&self) -> &OutputMode {
        &self.output_mode
    }

    /// Whether reachable links are downloaded
    pub fn download(&self) -> bool {
        self.download
    }

    /// File-derived settings (endpoints, caps, timeouts, paths)
    pub fn settings(&self) -> &FileConfig {
        &self.settings
    }

    /// Directory for downloaded content
    pub fn download_dir(&self) -> PathBuf {
        PathBuf::from(&self.settings.output.download_dir)
    }

    /// Engines whose credentials are present, in invocation order
    ///
    /// Engines without credentials are skipped silently; multi-engine use
    /// is optional.
    pub fn eligible_engines(&self) -> Vec<SourceEngine> {
        SourceEngine::all()
            .iter()
            .copied()
            .filter(|engine| match engine {
                SourceEngine::Web => self.web.is_some(),
                SourceEngine::General => self.general.is_some(),
            })
            .collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
