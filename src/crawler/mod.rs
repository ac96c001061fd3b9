//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Page fetching over plain HTTP or a headless browser
//! - HTML parsing, link extraction and keyword matching
//! - The recursive, bounded-concurrency crawl engine
//! - Overall crawl coordination across seeds

mod coordinator;
mod engine;
mod fetcher;
mod parser;
#[cfg(feature = "rendered")]
mod render;
#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{build_fetcher, run_crawl, Coordinator, INVALID_SEED_KEY};
pub use engine::{CrawlEngine, CrawlTask, EngineSettings, FoundPage};
pub use fetcher::{build_http_client, FetchedPage, HttpFetcher, PageFetcher};
pub use parser::{contains_keyword, extract_links, parse_html, ParsedPage};
#[cfg(feature = "rendered")]
pub use render::RenderedFetcher;
