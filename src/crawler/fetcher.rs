//! Fetcher seam and typed fetch outcomes
//!
//! A fetch is one navigation attempt through the current browser session.
//! Failures are data the retry machine branches on, not unwound errors.

use crate::Result;
use async_trait::async_trait;

/// Result of a single navigation attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page loaded and its rendered source was captured
    Rendered {
        /// Rendered page markup
        html: String,
    },

    /// The attempt failed; `kind` decides whether it is worth retrying
    Failed(FetchFailure),
}

/// A classified fetch failure
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Failure classification driving the retry machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Navigation or readiness wait ran out of time; retryable
    Timeout,

    /// Transient command failure; retryable
    Transient,

    /// The browser session itself is gone; not retryable on this session
    SessionFatal,
}

impl FailureKind {
    /// Returns true if another attempt on the same session can succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::SessionFatal)
    }
}

/// One navigation attempt at a time against an exclusively owned browser
/// session, plus the session lifecycle operations the crawl loop drives.
#[async_trait]
pub trait PageFetcher {
    /// Performs one navigation attempt and returns the rendered markup or
    /// a classified failure. Must not panic; session loss is reported as
    /// `FailureKind::SessionFatal`.
    async fn fetch(&mut self, url: &str) -> FetchOutcome;

    /// Disposes the current session (best effort) and creates a fresh one.
    ///
    /// Failure to create the replacement is unrecoverable for the run.
    async fn recycle(&mut self) -> Result<()>;

    /// Tears down the session at end of run. Best effort.
    async fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(FailureKind::Timeout.is_retryable());
        assert!(FailureKind::Transient.is_retryable());
        assert!(!FailureKind::SessionFatal.is_retryable());
    }
}
