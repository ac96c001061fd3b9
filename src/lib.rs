//! Keyword-Scout: a bounded-depth keyword crawler
//!
//! This crate crawls each seed URL's own domain up to a fixed depth, reports the
//! pages whose text contains a keyword, and keeps a per-domain log of fetch
//! failures.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Keyword-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed list error: {0}")]
    Seeds(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure of a single page fetch
///
/// The `Display` form is what ends up in the per-domain error log, so every
/// variant names the URL it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, FoundPage, PageFetcher};
pub use output::CrawlReport;
pub use state::{ErrorLog, VisitedSet};
pub use crate::url::extract_domain;
