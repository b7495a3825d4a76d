//! Configuration loading and validation
//!
//! Configuration is sourced from the process environment. Everything has a
//! default except the database location; see `env.rs` for the variable
//! names and defaults.

mod env;
mod types;
mod validation;

pub use env::{from_vars, load_from_env};
pub use types::{BrowserConfig, Config, CrawlConfig, DatabaseConfig};
pub use validation::validate;
