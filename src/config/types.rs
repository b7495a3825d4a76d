use std::path::PathBuf;

/// Main configuration structure for sitereap
#[derive(Debug, Clone)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub browser: BrowserConfig,
    pub database: DatabaseConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from
    pub start_url: String,

    /// Netloc derived from the seed URL; the crawl never leaves it
    pub domain: String,

    /// Maximum depth to crawl from the seed
    pub max_depth: u32,

    /// Lower bound of the politeness delay between pages (seconds)
    pub min_delay_secs: f64,

    /// Upper bound of the politeness delay between pages (seconds)
    pub max_delay_secs: f64,

    /// URL substrings that mark non-content pages (lowercase)
    pub skip_keywords: Vec<String>,

    /// File extensions that mark non-content URLs (lowercase, with dot)
    pub skip_extensions: Vec<String>,

    /// Number of fetched pages between browser session recycles
    pub session_recycle_interval: u64,

    /// Maximum retries per URL after the first attempt
    pub max_retries: u32,

    /// Optional cap on the number of pages fetched in a run
    pub page_limit: Option<u64>,
}

/// Browser session configuration.
///
/// The session shape is fixed and documented here rather than exposed as
/// tuning knobs: headless, images disabled, fixed timeouts, fixed user
/// agent. Only the WebDriver endpoint, the user agent string, and the
/// script-execution toggle are environment-sourced.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// WebDriver endpoint to connect to
    pub webdriver_url: String,

    /// User agent sent with every navigation
    pub user_agent: String,

    /// Whether to wait out dynamic content before reading the page source
    pub execute_scripts: bool,

    /// Navigation timeout applied to the session (milliseconds)
    pub page_load_timeout_ms: u64,

    /// Script execution timeout applied to the session (milliseconds)
    pub script_timeout_ms: u64,

    /// How long to wait for the body element to appear (milliseconds)
    pub body_timeout_ms: u64,

    /// Deadline for the document readiness poll (milliseconds)
    pub ready_state_timeout_ms: u64,

    /// Settle time before polling readiness (milliseconds)
    pub script_settle_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            execute_scripts: true,
            page_load_timeout_ms: 30_000,
            script_timeout_ms: 30_000,
            body_timeout_ms: 10_000,
            ready_state_timeout_ms: 5_000,
            script_settle_ms: 2_000,
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
}
