//! Sitereap: a bounded, polite single-site content harvester
//!
//! This crate crawls one website within a configured depth, renders each
//! page through a WebDriver session, extracts structured content, and
//! upserts page records into SQLite for downstream retrieval use.

pub mod config;
pub mod crawler;
pub mod session;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for sitereap operations
#[derive(Debug, Error)]
pub enum SitereapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to create browser session: {0}")]
    SessionCreate(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("Browser session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in configuration: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitereap operations
pub type Result<T> = std::result::Result<T, SitereapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlSummary};
pub use session::SessionManager;
pub use storage::{PageRecord, PageStatus};
pub use url::{is_eligible, normalize, EligibilityPolicy};
