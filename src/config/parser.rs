use crate::config::types::FileConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(FileConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fossick::config::load_config;
///
/// let config = load_config(Path::new("fossick.toml")).unwrap();
/// println!("Probe timeout: {}s", config.http.probe_timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: FileConfig = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if one was given, otherwise returns defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(FileConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[http]
user-agent = "TestFossick/1.0"
search-timeout-secs = 15
probe-timeout-secs = 5

[output]
csv-path = "./results.csv"
download-dir = "./dl"

[web]
endpoint = "http://127.0.0.1:9000/v7.0/search"
max-results = 20

[general]
max-results = 30
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.http.user_agent, "TestFossick/1.0");
        assert_eq!(config.http.probe_timeout_secs, 5);
        assert_eq!(config.output.csv_path, "./results.csv");
        assert_eq!(config.web.endpoint, "http://127.0.0.1:9000/v7.0/search");
        assert_eq!(config.web.max_results, 20);
        assert_eq!(config.general.max_results, 30);
        assert_eq!(
            config.general.endpoint,
            crate::config::types::DEFAULT_GENERAL_ENDPOINT
        );
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/fossick.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[general]
max-results = 250
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_bad_endpoint() {
        let config_content = r#"
[web]
endpoint = "api.bing.microsoft.com"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_load_config_or_default_without_path() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.web.max_results, 50);
        assert_eq!(config.general.max_results, 100);
    }
}
