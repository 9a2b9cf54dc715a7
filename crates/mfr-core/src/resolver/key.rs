//! Image-key extraction from redirector URLs.

use super::ResolveError;

/// Extracts the image key from a redirector URL: the last non-empty path
/// segment, after stripping at most one trailing slash from the URL string.
///
/// Purely syntactic; nothing verifies the key exists on the target host.
pub fn image_key(url: &str) -> Result<String, ResolveError> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let parsed =
        url::Url::parse(trimmed).map_err(|_| ResolveError::Unparsable(url.to_string()))?;
    parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
        .ok_or_else(|| ResolveError::Unparsable(url.to_string()))
}
