//! Content extraction from rendered markup
//!
//! Turns page source into the structured fields of a page record plus the
//! candidate outbound links. Extraction never fails: missing or malformed
//! elements degrade to documented defaults, and link validation is left
//! entirely to the frontier at enqueue time.

use scraper::{Html, Selector};
use url::Url;

/// Sentinel title for pages without a usable `<title>` element
pub const NO_TITLE: &str = "No Title";

/// Separator used when joining heading lists into a single field
const HEADING_SEPARATOR: &str = " | ";

/// Structured fields extracted from one rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub content: String,
    pub h1_tags: String,
    pub h2_tags: String,
    pub h3_tags: String,
    pub meta_description: String,
    pub meta_keywords: String,
}

/// Extracts page fields and candidate links from rendered markup.
///
/// Candidate links are every `<a href>` resolved against `base_url`,
/// unfiltered - the frontier decides what is actually crawlable. Hrefs
/// that cannot be resolved are skipped.
///
/// # Arguments
///
/// * `html` - The rendered page source
/// * `base_url` - The page's own (normalized) URL, for resolving relative links
pub fn extract(html: &str, base_url: &str) -> (ExtractedPage, Vec<String>) {
    let document = Html::parse_document(html);

    let page = ExtractedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        h1_tags: extract_headings(&document, "h1"),
        h2_tags: extract_headings(&document, "h2"),
        h3_tags: extract_headings(&document, "h3"),
        meta_description: extract_meta(&document, "description"),
        meta_keywords: extract_meta(&document, "keywords"),
    };

    let links = extract_links(&document, base_url);

    (page, links)
}

/// First `<title>` text, trimmed; the sentinel when absent or empty
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return NO_TITLE.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Visible body text, whitespace-collapsed, blank lines dropped
fn extract_content(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };

    let Some(body) = document.select(&selector).next() else {
        return String::new();
    };

    let joined = body
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    joined
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Non-empty heading texts at one level, in document order, joined
fn extract_headings(document: &Html, tag: &str) -> String {
    let Ok(selector) = Selector::parse(tag) else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(HEADING_SEPARATOR)
}

/// `content` attribute of `<meta name="...">`, empty string when absent
fn extract_meta(document: &Html, name: &str) -> String {
    let Ok(selector) = Selector::parse(&format!(r#"meta[name="{}"]"#, name)) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

/// Every anchor href resolved to an absolute URL
fn extract_links(document: &Html, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .map(|resolved| resolved.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/docs/page";

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>  Test Page  </title></head><body></body></html>";
        let (page, _) = extract(html, BASE);
        assert_eq!(page.title, "Test Page");
    }

    #[test]
    fn test_missing_title_uses_sentinel() {
        let html = "<html><head></head><body></body></html>";
        let (page, _) = extract(html, BASE);
        assert_eq!(page.title, NO_TITLE);
    }

    #[test]
    fn test_empty_title_uses_sentinel() {
        let html = "<html><head><title>   </title></head><body></body></html>";
        let (page, _) = extract(html, BASE);
        assert_eq!(page.title, NO_TITLE);
    }

    #[test]
    fn test_content_collapses_whitespace() {
        let html = "<html><body><p>  Hello   </p>\n\n<p>world</p></body></html>";
        let (page, _) = extract(html, BASE);
        assert_eq!(page.content, "Hello world");
    }

    #[test]
    fn test_missing_body_gives_empty_content() {
        let (page, _) = extract("<html><head></head></html>", BASE);
        // scraper synthesizes a body for well-formed documents; either way
        // the result must be empty, never an error
        assert_eq!(page.content, "");
    }

    #[test]
    fn test_headings_joined_in_order() {
        let html = "<html><body>\
            <h2>Second A</h2><h1>First</h1><h2>Second B</h2><h3></h3>\
            </body></html>";
        let (page, _) = extract(html, BASE);
        assert_eq!(page.h1_tags, "First");
        assert_eq!(page.h2_tags, "Second A | Second B");
        assert_eq!(page.h3_tags, "");
    }

    #[test]
    fn test_meta_tags() {
        let html = r#"<html><head>
            <meta name="description" content="A fine page">
            <meta name="keywords" content="one,two">
            </head><body></body></html>"#;
        let (page, _) = extract(html, BASE);
        assert_eq!(page.meta_description, "A fine page");
        assert_eq!(page.meta_keywords, "one,two");
    }

    #[test]
    fn test_meta_absent_defaults_empty() {
        let (page, _) = extract("<html><body></body></html>", BASE);
        assert_eq!(page.meta_description, "");
        assert_eq!(page.meta_keywords, "");
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="sibling">Sibling</a>
            <a href="https://other.com/x">External</a>
            </body></html>"#;
        let (_, links) = extract(html, BASE);
        assert_eq!(
            links,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/docs/sibling".to_string(),
                "https://other.com/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_links_not_validated_here() {
        // mailto and fragment links resolve fine; filtering is the
        // frontier's job
        let html = r##"<html><body>
            <a href="mailto:x@y.com">Mail</a>
            <a href="#section">Jump</a>
            </body></html>"##;
        let (_, links) = extract(html, BASE);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "mailto:x@y.com");
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let (page, links) = extract("<<<not html>>>", BASE);
        assert_eq!(page.title, NO_TITLE);
        assert!(links.is_empty());
    }

    #[test]
    fn test_bad_base_url_gives_no_links() {
        let html = r#"<html><body><a href="/about">About</a></body></html>"#;
        let (_, links) = extract(html, "not a url");
        assert!(links.is_empty());
    }
}
