use sha2::{Digest, Sha256};
use url::Url;

/// Fallback name when the URL path has no usable last segment
const INDEX_FILE_NAME: &str = "index.html";

/// Upper bound on the sanitized segment length
const MAX_SEGMENT_LEN: usize = 120;

/// Derives a local file name for a downloaded link
///
/// The name is `<hash>-<segment>`, where `<hash>` is the first 8 hex
/// characters of the SHA-256 of the full URL and `<segment>` is the last
/// path segment with anything outside `[A-Za-z0-9._-]` replaced by `_`.
/// The hash keeps links with the same last segment from overwriting each
/// other.
///
/// # Examples
///
/// ```
/// use fossick::url::download_file_name;
///
/// let name = download_file_name("https://example.com/docs/report.pdf");
/// assert!(name.ends_with("-report.pdf"));
/// assert_eq!(name.len(), 8 + 1 + "report.pdf".len());
/// ```
pub fn download_file_name(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{}-{}", &digest[..8], last_segment(url))
}

fn last_segment(url: &str) -> String {
    let segment = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();

    let sanitized: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_SEGMENT_LEN)
        .collect();

    // Bare dots would resolve to the current or parent directory
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        INDEX_FILE_NAME.to_string()
    } else {
        sanitized
    }
}
