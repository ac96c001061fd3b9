//! Configuration module for Keyword-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and reading the seed URL list they point to.
//!
//! # Example
//!
//! ```no_run
//! use keyword_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod seeds;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig, VisitedScope,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use seeds::{load_seeds, read_seeds, URL_COLUMN};

/// Re-validates a configuration after command-line overrides
pub fn revalidate(config: &Config) -> Result<(), crate::ConfigError> {
    validation::validate(config)
}
