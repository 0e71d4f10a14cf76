use serde::Deserialize;

/// Default Bing Web Search v7 endpoint
pub const DEFAULT_WEB_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Default Google Custom Search JSON API endpoint
pub const DEFAULT_GENERAL_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// File-based settings for Fossick
///
/// Every section is optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub web: WebEngineConfig,
    #[serde(default)]
    pub general: GeneralEngineConfig,
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for each search API request (seconds)
    #[serde(rename = "search-timeout-secs")]
    pub search_timeout_secs: u64,

    /// Timeout for each link probe or download (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("fossick/{}", env!("CARGO_PKG_VERSION")),
            search_timeout_secs: 30,
            probe_timeout_secs: 10,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file written with --write-csv
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Directory that receives downloaded content with --download
    #[serde(rename = "download-dir")]
    pub download_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "fossick-results.csv".to_string(),
            download_dir: "downloads".to_string(),
        }
    }
}

/// Web-search (Bing) engine settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WebEngineConfig {
    /// Search API endpoint URL
    pub endpoint: String,

    /// Maximum number of links to collect from this engine
    #[serde(rename = "max-results")]
    pub max_results: u32,
}

impl Default for WebEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEB_ENDPOINT.to_string(),
            max_results: 50,
        }
    }
}

/// General search (Google Custom Search) engine settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralEngineConfig {
    /// Search API endpoint URL
    pub endpoint: String,

    /// Maximum number of links to collect from this engine
    ///
    /// The Custom Search API never serves results past position 100.
    #[serde(rename = "max-results")]
    pub max_results: u32,
}

impl Default for GeneralEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERAL_ENDPOINT.to_string(),
            max_results: 100,
        }
    }
}
