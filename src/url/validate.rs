use crate::url::{netloc, normalize};
use std::collections::HashSet;
use url::Url;

/// Static filters applied when deciding whether a URL may enter the frontier.
///
/// The domain is the netloc of the seed URL; keywords and extensions are
/// matched against the lowercased normalized URL.
#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    /// Netloc the crawl is restricted to
    pub domain: String,

    /// Substrings that mark a URL as non-content (lowercase)
    pub skip_keywords: Vec<String>,

    /// File extensions that mark a URL as non-content (lowercase, with dot)
    pub skip_extensions: Vec<String>,
}

/// Decides whether a URL is eligible for the crawl frontier.
///
/// Rejects, in order: empty URLs; `mailto:`, `tel:`, `javascript:` and
/// pure-fragment links; anything [`normalize`] rejects (non-http(s)
/// schemes, missing host, malformed input); URLs outside the crawl domain;
/// URLs already visited; URLs ending in a skip extension; URLs containing
/// a skip keyword.
///
/// Pure predicate: no side effects, never panics, never errors.
pub fn is_eligible(url: &str, policy: &EligibilityPolicy, visited: &HashSet<String>) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }

    if url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with("javascript:")
        || url.starts_with('#')
    {
        return false;
    }

    let Ok(normalized) = normalize(url) else {
        return false;
    };

    // The normalized form always reparses; a failure here means the URL is
    // not usable as a key anyway.
    let Ok(parsed) = Url::parse(&normalized) else {
        return false;
    };

    if netloc(&parsed).as_deref() != Some(policy.domain.as_str()) {
        return false;
    }

    if visited.contains(&normalized) {
        return false;
    }

    let lowered = normalized.to_lowercase();

    if policy
        .skip_extensions
        .iter()
        .any(|ext| lowered.ends_with(ext.as_str()))
    {
        return false;
    }

    if policy
        .skip_keywords
        .iter()
        .any(|kw| !kw.is_empty() && lowered.contains(kw.as_str()))
    {
        return false;
    }

    true
}
