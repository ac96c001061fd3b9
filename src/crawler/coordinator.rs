//! Crawler coordinator - run-level orchestration
//!
//! This module drives one crawl run across all seed URLs:
//! - Building the fetch backend selected by configuration
//! - Validating seeds and deriving the input domains
//! - Crawling each seed with the engine, in seed order
//! - Scoping the visited ledger per run or per seed
//! - Aggregating found pages and errors into a `CrawlReport`

use crate::config::{Config, CrawlerConfig, VisitedScope};
use crate::crawler::engine::{CrawlEngine, EngineSettings};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::output::CrawlReport;
use crate::state::{ErrorLog, VisitedSet};
use crate::url::{extract_domain, is_valid_url};
use crate::{ConfigError, ScoutError};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Error-log key under which unusable seeds are recorded
pub const INVALID_SEED_KEY: &str = "<invalid-seed>";

/// Main crawl orchestrator
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    settings: EngineSettings,
    scope: VisitedScope,
}

impl Coordinator {
    /// Creates a coordinator around an existing fetch backend
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration (keyword, limits, visited scope)
    /// * `fetcher` - The fetch backend used for every page of every run
    pub fn new(config: &CrawlerConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            settings: EngineSettings::from(config),
            scope: config.visited_scope,
        }
    }

    /// Creates a coordinator with the backend selected by the configuration
    pub fn from_config(config: &Config) -> Result<Self, ScoutError> {
        let fetcher = build_fetcher(config)?;
        Ok(Self::new(&config.crawler, fetcher))
    }

    /// Runs one crawl over all seeds
    ///
    /// Each run gets a fresh error log and, with the run scope, a single
    /// visited ledger shared by all seeds. Seeds that are not absolute URLs
    /// with a host are logged under [`INVALID_SEED_KEY`] and skipped.
    ///
    /// Never fails: every per-page failure is recovered and reported.
    pub async fn run(&self, seeds: &[String]) -> CrawlReport {
        let start_time = Instant::now();
        let errors = Arc::new(ErrorLog::new());
        let engine = CrawlEngine::new(
            Arc::clone(&self.fetcher),
            self.settings.clone(),
            Arc::clone(&errors),
        );

        tracing::info!(
            "Starting crawl of {} seeds (keyword: '{}', max depth: {}, backend: {}, visited scope: {:?})",
            seeds.len(),
            self.settings.keyword,
            self.settings.max_depth,
            self.fetcher.name(),
            self.scope
        );

        let run_visited = Arc::new(VisitedSet::new());
        let mut found_pages = Vec::new();
        let mut input_domains = BTreeSet::new();
        let mut pages_fetched = 0;

        for (index, seed) in seeds.iter().enumerate() {
            let (url, domain) = match parse_seed(seed) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    tracing::warn!("Skipping invalid seed '{}': {}", seed, reason);
                    errors.record(
                        INVALID_SEED_KEY,
                        format!("invalid seed URL '{}': {}", seed, reason),
                    );
                    continue;
                }
            };
            input_domains.insert(domain);

            let visited = match self.scope {
                VisitedScope::Run => Arc::clone(&run_visited),
                VisitedScope::Seed => Arc::new(VisitedSet::new()),
            };
            let claimed_before = visited.len();

            tracing::info!("Seed {}/{}: {}", index + 1, seeds.len(), url);
            let pages = engine.crawl(url, Arc::clone(&visited)).await;
            pages_fetched += visited.len() - claimed_before;

            tracing::info!("Seed {} yielded {} matching pages", seed, pages.len());
            found_pages.extend(pages);
        }

        let report = CrawlReport::new(found_pages, input_domains, errors.snapshot(), pages_fetched);

        tracing::info!(
            "Crawl completed: {} pages fetched, {} matches, {} error domains in {:?}",
            report.pages_fetched,
            report.found_pages.len(),
            report.errors.len(),
            start_time.elapsed()
        );

        report
    }
}

/// Builds the fetch backend selected by `use-rendered-fetch`
///
/// # Returns
///
/// * `Ok(Arc<dyn PageFetcher>)` - The backend
/// * `Err(ScoutError)` - The timeout is not a positive duration, the HTTP
///   client could not be built, or the rendered backend was requested from a
///   build without the `rendered` feature
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn PageFetcher>, ScoutError> {
    let timeout = fetch_timeout(config.crawler.fetch_timeout_seconds)?;

    if config.crawler.use_rendered_fetch {
        return rendered_fetcher(config, timeout);
    }

    Ok(Arc::new(HttpFetcher::new(&config.user_agent, timeout)?))
}

/// Converts `fetch-timeout-seconds` into a duration
fn fetch_timeout(seconds: f64) -> Result<Duration, ConfigError> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-seconds must be positive, got {}",
            seconds
        )));
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| {
        ConfigError::Validation(format!("fetch-timeout-seconds {} is out of range: {}", seconds, e))
    })
}

#[cfg(feature = "rendered")]
fn rendered_fetcher(
    config: &Config,
    timeout: Duration,
) -> Result<Arc<dyn PageFetcher>, ScoutError> {
    use crate::crawler::render::RenderedFetcher;

    Ok(Arc::new(RenderedFetcher::new(
        config.user_agent.header_value(),
        timeout,
    )))
}

#[cfg(not(feature = "rendered"))]
fn rendered_fetcher(
    _config: &Config,
    _timeout: Duration,
) -> Result<Arc<dyn PageFetcher>, ScoutError> {
    Err(ConfigError::Validation(
        "use-rendered-fetch requires a build with the `rendered` feature".to_string(),
    )
    .into())
}

/// Parses a seed and extracts its domain
fn parse_seed(seed: &str) -> Result<(Url, String), String> {
    let url = Url::parse(seed.trim()).map_err(|e| e.to_string())?;
    if !is_valid_url(&url) {
        return Err("missing network location".to_string());
    }

    let domain = extract_domain(&url).ok_or_else(|| "missing network location".to_string())?;
    Ok((url, domain))
}

/// Runs a complete crawl operation
///
/// Builds the backend from the configuration and crawls the given seeds.
///
/// # Example
///
/// ```no_run
/// use keyword_scout::config::{load_config, load_seeds};
/// use keyword_scout::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let seeds = load_seeds(Path::new(&config.input.seeds_path))?;
/// let report = run_crawl(&config, &seeds).await?;
/// println!("{} pages found", report.found_pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, seeds: &[String]) -> Result<CrawlReport, ScoutError> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run(seeds).await)
}
