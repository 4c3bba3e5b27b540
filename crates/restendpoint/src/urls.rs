//! Base URL validation and path joining.

use url::Url;

use crate::error::{RestEndpointError, Result};

/// Whether `url` is an absolute `http` or `https` URL with a host.
///
/// This is narrower than "parses as a URL": `ftp://`, `file:` and other
/// schemes are rejected, as are scheme-relative and host-less forms. Only
/// URLs the HTTP transport can send to pass.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate and normalize a base URL. The trailing slash is removed.
pub(crate) fn normalize_base(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    if !is_valid_url(trimmed) {
        return Err(RestEndpointError::InvalidUrl(format!(
            "'{base_url}' is not an absolute http(s) URL"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Append `path` to a normalized base URL, adding the leading slash when it
/// is missing.
pub(crate) fn resolve(base_url: &str, path: &str) -> Result<Url> {
    let joined = if path.is_empty() {
        base_url.to_string()
    } else if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    };
    Ok(Url::parse(&joined)?)
}
