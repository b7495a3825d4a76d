//! Browser session lifecycle management
//!
//! One WebDriver session at a time, owned exclusively by the
//! `SessionManager`. The session is created lazily on first use and
//! recycled on demand: long-lived browser sessions accumulate memory, so
//! the crawl loop asks for a fresh one every N pages and after any
//! session-fatal failure.

use crate::config::BrowserConfig;
use crate::crawler::{FailureKind, FetchFailure, FetchOutcome, PageFetcher};
use crate::{Result, SitereapError};
use async_trait::async_trait;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::{Duration, Instant};

/// Owns at most one live WebDriver session and its page counter
pub struct SessionManager {
    config: BrowserConfig,
    client: Option<Client>,
    pages_served: u64,
}

/// A navigation attempt error before classification
enum NavError {
    Cmd(fantoccini::error::CmdError),
    ReadyTimeout,
}

impl SessionManager {
    /// Cheap and infallible; the WebDriver session is created on first
    /// fetch.
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: None,
            pages_served: 0,
        }
    }

    /// Creates a new session with the fixed, documented configuration:
    /// headless, images disabled, fixed timeouts, fixed user agent.
    async fn connect(&self) -> Result<Client> {
        let client = ClientBuilder::native()
            .capabilities(build_capabilities(&self.config))
            .connect(&self.config.webdriver_url)
            .await?;

        let timeouts = TimeoutConfiguration::new(
            Some(Duration::from_millis(self.config.script_timeout_ms)),
            Some(Duration::from_millis(self.config.page_load_timeout_ms)),
            None,
        );
        client.update_timeouts(timeouts).await?;

        Ok(client)
    }

    async fn ensure_session(&mut self) -> Result<()> {
        if self.client.is_none() {
            tracing::info!(
                "Creating browser session via {}",
                self.config.webdriver_url
            );
            self.client = Some(self.connect().await?);
            self.pages_served = 0;
        }
        Ok(())
    }

    /// Best-effort disposal of the current session; failures are logged,
    /// never propagated.
    async fn dispose(&mut self) {
        if let Some(client) = self.client.take() {
            tracing::debug!(
                "Disposing browser session after {} pages",
                self.pages_served
            );
            if let Err(e) = client.close().await {
                tracing::warn!("Error while disposing browser session: {}", e);
            }
        }
    }
}

#[async_trait]
impl PageFetcher for SessionManager {
    async fn fetch(&mut self, url: &str) -> FetchOutcome {
        if let Err(e) = self.ensure_session().await {
            return FetchOutcome::Failed(FetchFailure {
                kind: FailureKind::SessionFatal,
                message: e.to_string(),
            });
        }

        let Some(client) = self.client.as_ref() else {
            return FetchOutcome::Failed(FetchFailure {
                kind: FailureKind::SessionFatal,
                message: "no live browser session".to_string(),
            });
        };

        match navigate_and_render(client, &self.config, url).await {
            Ok(html) => {
                self.pages_served += 1;
                FetchOutcome::Rendered { html }
            }
            Err(e) => FetchOutcome::Failed(classify_nav_error(e)),
        }
    }

    async fn recycle(&mut self) -> Result<()> {
        self.dispose().await;

        let client = self.connect().await.map_err(|e| {
            SitereapError::Session(format!("failed to recreate browser session: {}", e))
        })?;
        self.client = Some(client);
        self.pages_served = 0;

        Ok(())
    }

    async fn shutdown(&mut self) {
        self.dispose().await;
    }
}

/// Navigates, waits the page out, and returns the rendered source
async fn navigate_and_render(
    client: &Client,
    config: &BrowserConfig,
    url: &str,
) -> std::result::Result<String, NavError> {
    client.goto(url).await.map_err(NavError::Cmd)?;

    if config.execute_scripts {
        // Give dynamic content a moment, then wait for the document to
        // settle
        tokio::time::sleep(Duration::from_millis(config.script_settle_ms)).await;
        wait_until_ready(client, config).await?;
    }

    client
        .wait()
        .at_most(Duration::from_millis(config.body_timeout_ms))
        .for_element(Locator::Css("body"))
        .await
        .map_err(NavError::Cmd)?;

    client.source().await.map_err(NavError::Cmd)
}

/// Polls `document.readyState` until complete or the deadline passes
async fn wait_until_ready(
    client: &Client,
    config: &BrowserConfig,
) -> std::result::Result<(), NavError> {
    let deadline = Instant::now() + Duration::from_millis(config.ready_state_timeout_ms);

    loop {
        let state = client
            .execute("return document.readyState", vec![])
            .await
            .map_err(NavError::Cmd)?;

        if state.as_str() == Some("complete") {
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(NavError::ReadyTimeout);
        }

        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

fn classify_nav_error(error: NavError) -> FetchFailure {
    match error {
        NavError::ReadyTimeout => FetchFailure {
            kind: FailureKind::Timeout,
            message: "timed out waiting for document readiness".to_string(),
        },
        NavError::Cmd(fantoccini::error::CmdError::WaitTimeout) => FetchFailure {
            kind: FailureKind::Timeout,
            message: "timed out waiting for body element".to_string(),
        },
        NavError::Cmd(e) => {
            let message = e.to_string();
            FetchFailure {
                kind: classify_message(&message),
                message,
            }
        }
    }
}

/// Classifies a WebDriver error message into a failure kind.
///
/// Session loss surfaces as command errors mentioning the session, so the
/// classification has to go by message text.
fn classify_message(message: &str) -> FailureKind {
    let lowered = message.to_lowercase();

    if lowered.contains("invalid session")
        || lowered.contains("unable to find session")
        || lowered.contains("session not created")
        || lowered.contains("session deleted")
        || lowered.contains("browsing context has been discarded")
    {
        return FailureKind::SessionFatal;
    }

    if lowered.contains("timeout") || lowered.contains("timed out") {
        return FailureKind::Timeout;
    }

    FailureKind::Transient
}

/// Fixed session shape: headless Chrome with non-essential resource
/// loading disabled and the configured user agent.
fn build_capabilities(config: &BrowserConfig) -> serde_json::Map<String, serde_json::Value> {
    let args = vec![
        "--headless=new".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-extensions".to_string(),
        "--disable-gpu".to_string(),
        "--blink-settings=imagesEnabled=false".to_string(),
        "--disable-background-networking".to_string(),
        "--mute-audio".to_string(),
        format!("--user-agent={}", config.user_agent),
    ];

    serde_json::json!({
        "goog:chromeOptions": {
            "args": args,
        }
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_session_loss() {
        assert_eq!(
            classify_message("Unable to find session with ID: 1234"),
            FailureKind::SessionFatal
        );
        assert_eq!(
            classify_message("invalid session id"),
            FailureKind::SessionFatal
        );
    }

    #[test]
    fn test_classify_timeout() {
        assert_eq!(
            classify_message("Timeout loading page after 30000ms"),
            FailureKind::Timeout
        );
        assert_eq!(
            classify_message("navigation timed out"),
            FailureKind::Timeout
        );
    }

    #[test]
    fn test_classify_other_errors_as_transient() {
        assert_eq!(
            classify_message("unknown error: net::ERR_CONNECTION_RESET"),
            FailureKind::Transient
        );
    }

    #[test]
    fn test_wait_timeout_variant_is_timeout() {
        let failure = classify_nav_error(NavError::Cmd(fantoccini::error::CmdError::WaitTimeout));
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[test]
    fn test_capabilities_include_headless_and_agent() {
        let config = BrowserConfig::default();
        let caps = build_capabilities(&config);
        let args = caps["goog:chromeOptions"]["args"]
            .as_array()
            .expect("args array");

        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(args
            .iter()
            .any(|a| a.as_str().is_some_and(|s| s.starts_with("--user-agent="))));
    }
}
