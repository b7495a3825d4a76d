//! Environment-sourced configuration loading
//!
//! Every setting has a default except `DATABASE_PATH`, which must be
//! present. Parsing is a pure function over a variable map so it can be
//! tested without touching process environment.

use crate::config::types::{BrowserConfig, Config, CrawlConfig, DatabaseConfig};
use crate::config::validation::validate;
use crate::url::netloc;
use crate::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

const DEFAULT_START_URL: &str = "https://example.com/";
const DEFAULT_SKIP_KEYWORDS: &str = "login,logout,register,cart,privacy,terms";
const DEFAULT_SKIP_EXTENSIONS: &str = ".pdf,.jpg,.jpeg,.png,.gif,.bmp,.svg,.zip,.rar,\
                                       .mp3,.mp4,.avi,.mov,.css,.js,.xml,.json,.txt";

/// Loads and validates configuration from the process environment
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - A variable was missing, unparseable, or invalid
pub fn load_from_env() -> ConfigResult<Config> {
    let vars: HashMap<String, String> = std::env::vars().collect();
    from_vars(&vars)
}

/// Builds a configuration from an explicit variable map
pub fn from_vars(vars: &HashMap<String, String>) -> ConfigResult<Config> {
    let start_url = string_or(vars, "START_URL", DEFAULT_START_URL);

    let parsed = Url::parse(&start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("START_URL: {}", e)))?;
    let domain = netloc(&parsed)
        .ok_or_else(|| ConfigError::InvalidUrl("START_URL has no host".to_string()))?;

    let page_limit = match parse_or(vars, "PAGE_LIMIT", 0u64)? {
        0 => None,
        n => Some(n),
    };

    let database_path = vars
        .get("DATABASE_PATH")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingVar("DATABASE_PATH".to_string()))?;

    let mut browser = BrowserConfig {
        webdriver_url: string_or(vars, "WEBDRIVER_URL", &BrowserConfig::default().webdriver_url),
        execute_scripts: bool_or(vars, "ENABLE_JAVASCRIPT", true),
        ..BrowserConfig::default()
    };
    if let Some(agent) = vars.get("USER_AGENT").filter(|v| !v.trim().is_empty()) {
        browser.user_agent = agent.trim().to_string();
    }

    let config = Config {
        crawl: CrawlConfig {
            start_url,
            domain,
            max_depth: parse_or(vars, "MAX_DEPTH", 2)?,
            min_delay_secs: parse_or(vars, "MIN_DELAY_BETWEEN_PAGES", 0.5)?,
            max_delay_secs: parse_or(vars, "MAX_DELAY_BETWEEN_PAGES", 1.5)?,
            skip_keywords: list_or(vars, "SKIP_KEYWORDS", DEFAULT_SKIP_KEYWORDS),
            skip_extensions: list_or(vars, "SKIP_EXTENSIONS", DEFAULT_SKIP_EXTENSIONS),
            session_recycle_interval: parse_or(vars, "SESSION_RECYCLE_INTERVAL", 50)?,
            max_retries: parse_or(vars, "MAX_RETRIES", 3)?,
            page_limit,
        },
        browser,
        database: DatabaseConfig {
            path: database_path,
        },
    };

    validate(&config)?;

    Ok(config)
}

fn string_or(vars: &HashMap<String, String>, name: &str, default: &str) -> String {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn parse_or<T>(vars: &HashMap<String, String>, name: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            message: e.to_string(),
        }),
    }
}

fn bool_or(vars: &HashMap<String, String>, name: &str, default: bool) -> bool {
    match vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => default,
        Some(raw) => raw.eq_ignore_ascii_case("true"),
    }
}

/// Splits a comma-separated variable into trimmed, lowercased entries
fn list_or(vars: &HashMap<String, String>, name: &str, default: &str) -> Vec<String> {
    let raw = string_or(vars, name, default);
    raw.split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_PATH".to_string(), "/tmp/test.db".to_string());
        vars
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&base_vars()).unwrap();

        assert_eq!(config.crawl.start_url, DEFAULT_START_URL);
        assert_eq!(config.crawl.domain, "example.com");
        assert_eq!(config.crawl.max_depth, 2);
        assert_eq!(config.crawl.min_delay_secs, 0.5);
        assert_eq!(config.crawl.max_delay_secs, 1.5);
        assert_eq!(config.crawl.session_recycle_interval, 50);
        assert_eq!(config.crawl.max_retries, 3);
        assert_eq!(config.crawl.page_limit, None);
        assert!(config.crawl.skip_keywords.contains(&"login".to_string()));
        assert!(config.crawl.skip_extensions.contains(&".pdf".to_string()));
        assert!(config.browser.execute_scripts);
        assert_eq!(config.browser.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_missing_database_path() {
        let result = from_vars(&HashMap::new());
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_empty_database_path_is_missing() {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_PATH".to_string(), "  ".to_string());
        let result = from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_domain_derived_from_start_url() {
        let mut vars = base_vars();
        vars.insert(
            "START_URL".to_string(),
            "http://crawl.target:8080/docs".to_string(),
        );
        let config = from_vars(&vars).unwrap();
        assert_eq!(config.crawl.domain, "crawl.target:8080");
    }

    #[test]
    fn test_invalid_start_url() {
        let mut vars = base_vars();
        vars.insert("START_URL".to_string(), "not a url".to_string());
        let result = from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_page_limit_zero_means_none() {
        let mut vars = base_vars();
        vars.insert("PAGE_LIMIT".to_string(), "0".to_string());
        let config = from_vars(&vars).unwrap();
        assert_eq!(config.crawl.page_limit, None);

        vars.insert("PAGE_LIMIT".to_string(), "25".to_string());
        let config = from_vars(&vars).unwrap();
        assert_eq!(config.crawl.page_limit, Some(25));
    }

    #[test]
    fn test_unparseable_number() {
        let mut vars = base_vars();
        vars.insert("MAX_DEPTH".to_string(), "deep".to_string());
        let result = from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_javascript_toggle() {
        let mut vars = base_vars();
        vars.insert("ENABLE_JAVASCRIPT".to_string(), "FALSE".to_string());
        let config = from_vars(&vars).unwrap();
        assert!(!config.browser.execute_scripts);

        vars.insert("ENABLE_JAVASCRIPT".to_string(), "True".to_string());
        let config = from_vars(&vars).unwrap();
        assert!(config.browser.execute_scripts);
    }

    #[test]
    fn test_keyword_list_lowercased_and_trimmed() {
        let mut vars = base_vars();
        vars.insert("SKIP_KEYWORDS".to_string(), " Login , CART,,terms ".to_string());
        let config = from_vars(&vars).unwrap();
        assert_eq!(
            config.crawl.skip_keywords,
            vec!["login".to_string(), "cart".to_string(), "terms".to_string()]
        );
    }

    #[test]
    fn test_empty_var_falls_back_to_default() {
        let mut vars = base_vars();
        vars.insert("MAX_DEPTH".to_string(), "".to_string());
        let config = from_vars(&vars).unwrap();
        assert_eq!(config.crawl.max_depth, 2);
    }
}
