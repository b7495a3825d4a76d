//! Bounded retry around single fetch attempts
//!
//! Every URL passes through here exactly once and comes out as exactly one
//! terminal page record, regardless of how many attempts were needed. The
//! retry sequence is an explicit loop over an attempt counter: attempt 0
//! is the first fetch, and at most `max_retries` further attempts follow,
//! each after a fixed backoff. Session-fatal failures skip the retries and
//! additionally tell the caller to recycle the browser session.

use crate::config::CrawlConfig;
use crate::crawler::extractor::{extract, ExtractedPage};
use crate::crawler::fetcher::{FailureKind, FetchOutcome, PageFetcher};
use crate::storage::{PageRecord, PageStatus};
use std::time::Duration;

/// Fixed pause between retry attempts (distinct from the politeness delay)
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Terminal result of a URL's fetch/retry sequence
#[derive(Debug)]
pub struct FetchReport {
    /// The single terminal record for this URL
    pub record: PageRecord,

    /// Candidate outbound links, empty unless the fetch succeeded
    pub links: Vec<String>,

    /// True when the failure invalidated the browser session and the
    /// caller must recycle it before continuing
    pub session_fatal: bool,
}

/// Drives one URL to a terminal record through bounded retries.
///
/// # Arguments
///
/// * `fetcher` - The fetch seam backed by the current browser session
/// * `url` - Normalized URL to fetch
/// * `depth` - Link distance from the seed
/// * `config` - Crawl configuration (retry cap)
pub async fn fetch_with_retry<F: PageFetcher>(
    fetcher: &mut F,
    url: &str,
    depth: u32,
    config: &CrawlConfig,
) -> FetchReport {
    let mut attempt: u32 = 0;

    loop {
        match fetcher.fetch(url).await {
            FetchOutcome::Rendered { html } => {
                let (page, links) = extract(&html, url);
                return FetchReport {
                    record: success_record(url, depth, attempt, page),
                    links,
                    session_fatal: false,
                };
            }

            FetchOutcome::Failed(failure) => {
                if !failure.kind.is_retryable() {
                    tracing::warn!(
                        "Session-fatal failure on {} (attempt {}): {}",
                        url,
                        attempt + 1,
                        failure.message
                    );
                    return FetchReport {
                        record: failure_record(url, depth, attempt, failure.kind),
                        links: Vec::new(),
                        session_fatal: true,
                    };
                }

                if attempt < config.max_retries {
                    attempt += 1;
                    tracing::info!(
                        "Retrying {} (attempt {}/{}): {}",
                        url,
                        attempt,
                        config.max_retries,
                        failure.message
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                    continue;
                }

                tracing::warn!(
                    "Giving up on {} after {} attempts: {}",
                    url,
                    attempt + 1,
                    failure.message
                );
                return FetchReport {
                    record: failure_record(url, depth, attempt, failure.kind),
                    links: Vec::new(),
                    session_fatal: false,
                };
            }
        }
    }
}

fn success_record(url: &str, depth: u32, retry_count: u32, page: ExtractedPage) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        title: page.title,
        content: page.content,
        h1_tags: page.h1_tags,
        h2_tags: page.h2_tags,
        h3_tags: page.h3_tags,
        meta_description: page.meta_description,
        meta_keywords: page.meta_keywords,
        depth,
        retry_count,
        status: PageStatus::Success,
    }
}

/// Terminal record for an exhausted or short-circuited failure: empty
/// content fields, a title naming the failure mode, and the final count.
fn failure_record(url: &str, depth: u32, retry_count: u32, kind: FailureKind) -> PageRecord {
    let (title, status) = match kind {
        FailureKind::Timeout => ("Failed to load", PageStatus::Failed),
        FailureKind::Transient | FailureKind::SessionFatal => ("Error occurred", PageStatus::Error),
    };

    PageRecord {
        url: url.to_string(),
        title: title.to_string(),
        content: String::new(),
        h1_tags: String::new(),
        h2_tags: String::new(),
        h3_tags: String::new(),
        meta_description: String::new(),
        meta_keywords: String::new(),
        depth,
        retry_count,
        status,
    }
}
