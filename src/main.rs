//! Keyword-Scout main entry point
//!
//! This is the command-line interface for the Keyword-Scout crawler.

use clap::Parser;
use keyword_scout::config::{self, load_config_with_hash, load_seeds, Config};
use keyword_scout::crawler::run_crawl;
use keyword_scout::output::{print_report, write_report};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Keyword-Scout: a bounded-depth keyword crawler
///
/// Keyword-Scout crawls each seed URL's own domain up to a fixed depth and
/// reports the pages whose text contains a keyword, along with the domains
/// that produced matches, the ones that did not, and the ones that failed.
#[derive(Parser, Debug)]
#[command(name = "keyword-scout")]
#[command(version)]
#[command(about = "A bounded-depth keyword crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seeds and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the keyword from the config file
    #[arg(long, value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Override the maximum crawl depth from the config file
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if apply_overrides(&mut config, &cli) {
        if let Err(e) = config::revalidate(&config) {
            tracing::error!("Invalid command-line override: {}", e);
            return Err(e.into());
        }
    }

    let seeds = match load_seeds(Path::new(&config.input.seeds_path)) {
        Ok(seeds) => seeds,
        Err(e) => {
            tracing::error!("Failed to load seeds: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Loaded {} seed URLs from {}", seeds.len(), config.input.seeds_path);

    if cli.dry_run {
        handle_dry_run(&config, &seeds);
    } else {
        handle_crawl(&config, &seeds).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("keyword_scout=info,warn"),
            1 => EnvFilter::new("keyword_scout=debug,info"),
            2 => EnvFilter::new("keyword_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides; returns true if anything changed
fn apply_overrides(config: &mut Config, cli: &Cli) -> bool {
    let mut changed = false;

    if let Some(keyword) = &cli.keyword {
        tracing::info!("Keyword overridden on command line: '{}'", keyword);
        config.crawler.keyword = keyword.clone();
        changed = true;
    }

    if let Some(max_depth) = cli.max_depth {
        tracing::info!("Max depth overridden on command line: {}", max_depth);
        config.crawler.max_depth = max_depth;
        changed = true;
    }

    changed
}

/// Handles the --dry-run mode: shows the effective settings and seeds
fn handle_dry_run(config: &Config, seeds: &[String]) {
    println!("=== Keyword-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Keyword: {}", config.crawler.keyword);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max workers per node: {}",
        config.crawler.max_workers_per_node
    );
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!(
        "  Fetch timeout: {}s",
        config.crawler.fetch_timeout_seconds
    );
    println!(
        "  Backend: {}",
        if config.crawler.use_rendered_fetch {
            "rendered"
        } else {
            "http"
        }
    );
    println!("  Visited scope: {:?}", config.crawler.visited_scope);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Found pages: {}", config.output.found_pages_path);
    println!("  Found domains: {}", config.output.found_domains_path);
    println!("  Error domains: {}", config.output.error_domains_path);
    if let Some(path) = &config.output.not_found_domains_path {
        println!("  Not-found domains: {}", path);
    }

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} seed URLs", seeds.len());
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seeds: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let report = match run_crawl(config, seeds).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = write_report(&report, &config.output) {
        tracing::error!("Failed to write results: {}", e);
        return Err(e.into());
    }

    print_report(&report, &config.crawler.keyword);
    Ok(())
}
