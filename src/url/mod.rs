//! URL normalization and crawl eligibility
//!
//! Every comparison the crawler makes (visited checks, queue membership,
//! persistence keys) happens on the normalized form produced here.

mod normalize;
mod validate;

pub use normalize::normalize;
pub use validate::{is_eligible, EligibilityPolicy};

use ::url::Url;

/// Returns the network location (host plus optional port) of a URL.
///
/// This is the unit of domain equality for the crawl: `example.com` and
/// `example.com:8080` are different crawl targets.
pub fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netloc_without_port() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(netloc(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_netloc_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(netloc(&url), Some("127.0.0.1:8080".to_string()));
    }
}
