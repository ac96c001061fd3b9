use serde::Deserialize;

/// Main configuration structure for Keyword-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Keyword searched for in each page's text (case-insensitive)
    pub keyword: String,

    /// Maximum link depth from each seed URL (the seed is depth 0)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of child visits running at once per expanded page
    #[serde(rename = "max-workers-per-node", default = "default_max_workers_per_node")]
    pub max_workers_per_node: u32,

    /// Maximum number of fetches outstanding at once across the whole run
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: u32,

    /// Timeout of a single fetch attempt (seconds)
    #[serde(rename = "fetch-timeout-seconds", default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: f64,

    /// Fetch pages through a headless browser instead of plain HTTP
    #[serde(rename = "use-rendered-fetch", default)]
    pub use_rendered_fetch: bool,

    /// Lifetime of the visited-URL ledger
    #[serde(rename = "visited-scope", default)]
    pub visited_scope: VisitedScope,
}

/// How long a URL stays claimed once visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitedScope {
    /// One ledger for the whole run: a URL is fetched at most once per run
    #[default]
    Run,
    /// A fresh ledger per seed: seeds may rediscover each other's pages
    Seed,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "KeywordScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Seed input configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the CSV file listing seed URLs in a `url` column
    #[serde(rename = "seeds-path")]
    pub seeds_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the found-pages table (url, title)
    #[serde(rename = "found-pages-path")]
    pub found_pages_path: String,

    /// Path of the found-domains table (domain)
    #[serde(rename = "found-domains-path")]
    pub found_domains_path: String,

    /// Path of the error-domains table (domain, errors)
    #[serde(rename = "error-domains-path")]
    pub error_domains_path: String,

    /// Path of the not-found-domains table (domain)
    #[serde(rename = "not-found-domains-path", default)]
    pub not_found_domains_path: Option<String>,
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_workers_per_node() -> u32 {
    5
}

fn default_max_concurrent_fetches() -> u32 {
    32
}

fn default_fetch_timeout() -> f64 {
    10.0
}
