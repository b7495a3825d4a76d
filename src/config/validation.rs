use crate::config::types::{BrowserConfig, Config, CrawlConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_browser_config(&config.browser)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let start = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("START_URL: {}", e)))?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "START_URL must be http(s), got scheme '{}'",
            start.scheme()
        )));
    }

    if config.min_delay_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "MIN_DELAY_BETWEEN_PAGES must be >= 0, got {}",
            config.min_delay_secs
        )));
    }

    if config.max_delay_secs < config.min_delay_secs {
        return Err(ConfigError::Validation(format!(
            "MAX_DELAY_BETWEEN_PAGES ({}) must be >= MIN_DELAY_BETWEEN_PAGES ({})",
            config.max_delay_secs, config.min_delay_secs
        )));
    }

    if config.session_recycle_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "SESSION_RECYCLE_INTERVAL must be >= 1, got {}",
            config.session_recycle_interval
        )));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    Url::parse(&config.webdriver_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("WEBDRIVER_URL: {}", e)))?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "USER_AGENT cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DatabaseConfig;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                start_url: "https://example.com/".to_string(),
                domain: "example.com".to_string(),
                max_depth: 2,
                min_delay_secs: 0.5,
                max_delay_secs: 1.5,
                skip_keywords: vec!["login".to_string()],
                skip_extensions: vec![".pdf".to_string()],
                session_recycle_interval: 50,
                max_retries: 3,
                page_limit: None,
            },
            browser: BrowserConfig::default(),
            database: DatabaseConfig {
                path: "/tmp/test.db".into(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_seed() {
        let mut config = valid_config();
        config.crawl.start_url = "file:///etc/passwd".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_negative_min_delay() {
        let mut config = valid_config();
        config.crawl.min_delay_secs = -1.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_inverted_delay_bounds() {
        let mut config = valid_config();
        config.crawl.min_delay_secs = 2.0;
        config.crawl.max_delay_secs = 1.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_recycle_interval() {
        let mut config = valid_config();
        config.crawl.session_recycle_interval = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_webdriver_url() {
        let mut config = valid_config();
        config.browser.webdriver_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }
}
