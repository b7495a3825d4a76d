//! Crawl coordinator - main crawl orchestration logic
//!
//! The coordinator is the run context: it owns the frontier, the store,
//! and the fetcher for exactly one crawl run, constructed at run start and
//! torn down at run end. The loop is strictly sequential - one URL is
//! fetched, retried, extracted, and persisted at a time - which keeps the
//! frontier's sets race-free and makes the politeness delay an exact
//! per-request guarantee.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::retry::fetch_with_retry;
use crate::session::SessionManager;
use crate::storage::{PageStatus, PageStore, SqliteStore};
use crate::url::EligibilityPolicy;
use crate::Result;
use rand::Rng;
use std::time::{Duration, Instant};

/// Outcome of a completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Number of pages fetched (including terminal failures)
    pub pages_scraped: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Average time per page, `None` when nothing was fetched
    pub fn average_page_time(&self) -> Option<Duration> {
        if self.pages_scraped == 0 {
            return None;
        }
        Some(self.elapsed / self.pages_scraped as u32)
    }
}

/// Main crawl coordinator
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    store: SqliteStore,
    frontier: Frontier,
    fetcher: F,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates the run context: opens the store, clears prior crawl state,
    /// and seeds the frontier with the start URL at depth 0.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `fetcher` - The fetch seam (a real browser session in production)
    pub fn new(config: Config, fetcher: F) -> Result<Self> {
        let mut store = SqliteStore::new(&config.database.path)?;
        store.truncate_pages()?;
        tracing::info!("Cleared stored pages before crawling");

        let policy = EligibilityPolicy {
            domain: config.crawl.domain.clone(),
            skip_keywords: config.crawl.skip_keywords.clone(),
            skip_extensions: config.crawl.skip_extensions.clone(),
        };

        let mut frontier = Frontier::new(policy);
        frontier.enqueue(&config.crawl.start_url, 0);

        Ok(Self {
            config,
            store,
            frontier,
            fetcher,
        })
    }

    /// Runs the crawl to completion and returns the summary.
    ///
    /// The browser session is shut down on every exit path, including
    /// error propagation.
    pub async fn run(&mut self) -> Result<CrawlSummary> {
        let result = self.run_loop().await;
        self.fetcher.shutdown().await;
        result
    }

    async fn run_loop(&mut self) -> Result<CrawlSummary> {
        let started = Instant::now();
        let mut pages_scraped: u64 = 0;

        loop {
            if let Some(limit) = self.config.crawl.page_limit {
                if pages_scraped >= limit {
                    tracing::info!("Reached page limit of {}, stopping", limit);
                    break;
                }
            }

            let Some(entry) = self.frontier.dequeue() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            // Conditions may have changed since enqueue time
            if entry.depth > self.config.crawl.max_depth || !self.frontier.is_eligible(&entry.url)
            {
                continue;
            }

            self.frontier.mark_visited(&entry.url);
            pages_scraped += 1;

            tracing::info!(
                "Scraping ({}) | queue: {} | depth: {} | url: {}",
                pages_scraped,
                self.frontier.len(),
                entry.depth,
                entry.url
            );

            self.politeness_pause().await;

            let page_started = Instant::now();
            let report =
                fetch_with_retry(&mut self.fetcher, &entry.url, entry.depth, &self.config.crawl)
                    .await;

            // A failed write must not take the crawl down with it
            if let Err(e) = self.store.upsert_page(&report.record) {
                tracing::error!("Failed to persist {}: {}", entry.url, e);
            }

            tracing::info!(
                "Scraped {} in {:.2}s | status: {} | retries: {}",
                entry.url,
                page_started.elapsed().as_secs_f64(),
                report.record.status,
                report.record.retry_count
            );

            if report.record.status == PageStatus::Success
                && entry.depth < self.config.crawl.max_depth
            {
                for link in &report.links {
                    self.frontier.enqueue(link, entry.depth + 1);
                }
            }

            // Recycling happens between pages, never mid-page
            if report.session_fatal {
                tracing::warn!("Recycling browser session after fatal failure");
                self.fetcher.recycle().await?;
            } else if pages_scraped % self.config.crawl.session_recycle_interval == 0 {
                tracing::info!("Recycling browser session after {} pages", pages_scraped);
                self.fetcher.recycle().await?;
            }
        }

        Ok(CrawlSummary {
            pages_scraped,
            elapsed: started.elapsed(),
        })
    }

    /// Sleeps a random duration in the configured politeness window.
    ///
    /// Applies once per fetch sequence; retries use their own fixed
    /// backoff.
    async fn politeness_pause(&self) {
        let min = self.config.crawl.min_delay_secs;
        let max = self.config.crawl.max_delay_secs;

        let delay = if max > min {
            rand::rng().random_range(min..=max)
        } else {
            min
        };

        if delay > 0.0 {
            tokio::time::sleep(Duration::from_secs_f64(delay)).await;
        }
    }
}

/// Runs a complete crawl against a real browser session.
///
/// This is the main entry point: it builds the session manager from the
/// browser configuration and drives the coordinator to completion.
pub async fn run_crawl(config: Config) -> Result<CrawlSummary> {
    let fetcher = SessionManager::new(config.browser.clone());
    let mut coordinator = Coordinator::new(config, fetcher)?;
    coordinator.run().await
}
