use crate::config::types::{
    FileConfig, GeneralEngineConfig, HttpConfig, OutputConfig, WebEngineConfig,
};
use crate::ConfigError;
use url::Url;

/// Largest result cap accepted for the web-search engine
const WEB_MAX_RESULTS_LIMIT: u32 = 1000;

/// The Custom Search API refuses to page past result 100
const GENERAL_MAX_RESULTS_LIMIT: u32 = 100;

/// Validates the entire file configuration
pub fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_web_config(&config.web)?;
    validate_general_config(&config.general)?;
    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.search_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "search-timeout-secs must be >= 1, got {}",
            config.search_timeout_secs
        )));
    }

    if config.probe_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "probe-timeout-secs must be >= 1, got {}",
            config.probe_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output locations
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if config.download_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "download-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates web-search engine settings
fn validate_web_config(config: &WebEngineConfig) -> Result<(), ConfigError> {
    validate_endpoint("web", &config.endpoint)?;
    validate_max_results("web", config.max_results, WEB_MAX_RESULTS_LIMIT)
}

/// Validates general search engine settings
fn validate_general_config(config: &GeneralEngineConfig) -> Result<(), ConfigError> {
    validate_endpoint("general", &config.endpoint)?;
    validate_max_results("general", config.max_results, GENERAL_MAX_RESULTS_LIMIT)
}

fn validate_endpoint(section: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid {} endpoint '{}': {}", section, endpoint, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} endpoint '{}' must use http or https",
            section, endpoint
        )));
    }

    Ok(())
}

fn validate_max_results(section: &str, value: u32, limit: u32) -> Result<(), ConfigError> {
    if value < 1 || value > limit {
        return Err(ConfigError::Validation(format!(
            "{} max-results must be between 1 and {}, got {}",
            section, limit, value
        )));
    }
    Ok(())
}
