//! URL handling module for Fossick
//!
//! This module validates links returned by search providers and derives
//! local file names for downloaded content.

mod filename;

pub use filename::download_file_name;

use crate::UrlError;
use ::url::Url;

/// Parses a string as an absolute HTTP(S) URL
///
/// Search providers occasionally return relative or non-web links; those
/// are rejected so that every `LinkResult` carries a probeable URL.
///
/// # Arguments
///
/// * `raw` - The URL string to validate
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The string is not an absolute http/https URL with a host
///
/// # Examples
///
/// ```
/// use fossick::url::parse_absolute_url;
///
/// assert!(parse_absolute_url("https://example.com/page").is_ok());
/// assert!(parse_absolute_url("/relative/path").is_err());
/// ```
pub fn parse_absolute_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}
