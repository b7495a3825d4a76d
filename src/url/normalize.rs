use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL to the form used for all comparisons and storage keys.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than `http` and `https`
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after `#`)
/// 5. Strip trailing slashes from the serialized form, so `/page` and
///    `/page/` collapse to the same key
///
/// Normalization is idempotent: applying it to its own output yields the
/// same string.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(String)` - The normalized URL
/// * `Err(UrlError)` - Failed to parse or an unsupported scheme/shape
///
/// # Examples
///
/// ```
/// use sitereap::url::normalize;
///
/// let url = normalize("http://example.com/page/#section").unwrap();
/// assert_eq!(url, "http://example.com/page");
/// ```
pub fn normalize(url_str: &str) -> UrlResult<String> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url.to_string().trim_end_matches('/').to_string())
}
