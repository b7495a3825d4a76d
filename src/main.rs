//! Sitereap main entry point
//!
//! Single entry point, no sub-commands: configuration comes from the
//! environment, the CLI only controls verbosity.

use clap::Parser;
use sitereap::config::{load_from_env, Config};
use sitereap::crawler::run_crawl;
use tracing_subscriber::EnvFilter;

/// Sitereap: a bounded, polite single-site content harvester
///
/// Crawls one website within a configured depth, renders each page through
/// a WebDriver session, and stores extracted content in SQLite.
#[derive(Parser, Debug)]
#[command(name = "sitereap")]
#[command(version)]
#[command(about = "Bounded single-site content harvester", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Configuration problems are fatal before any crawling begins
    let config = match load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    print_configuration(&config);

    let summary = run_crawl(config).await?;

    println!("\n=== Crawl completed ===");
    println!("Total pages scraped : {}", summary.pages_scraped);
    println!("Total elapsed time  : {:.2}s", summary.elapsed.as_secs_f64());
    match summary.average_page_time() {
        Some(avg) => println!("Average per page    : {:.2}s", avg.as_secs_f64()),
        None => println!("No pages scraped"),
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitereap=info,warn"),
            1 => EnvFilter::new("sitereap=debug,info"),
            2 => EnvFilter::new("sitereap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints the effective configuration before the crawl starts
fn print_configuration(config: &Config) {
    println!("=== Crawl configuration ===");
    println!("Start URL          : {}", config.crawl.start_url);
    println!("Domain             : {}", config.crawl.domain);
    println!("Max depth          : {}", config.crawl.max_depth);
    println!(
        "Page limit         : {}",
        match config.crawl.page_limit {
            Some(limit) => limit.to_string(),
            None => "none".to_string(),
        }
    );
    println!(
        "Politeness delay   : {:.1}s - {:.1}s",
        config.crawl.min_delay_secs, config.crawl.max_delay_secs
    );
    println!("Max retries        : {}", config.crawl.max_retries);
    println!(
        "Session recycle    : every {} pages",
        config.crawl.session_recycle_interval
    );
    println!(
        "Script execution   : {}",
        if config.browser.execute_scripts {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Database           : {}", config.database.path.display());
    println!("===========================\n");
}
