//! URL handling module for Keyword-Scout
//!
//! Domain extraction and validity checks shared by link extraction, the crawl
//! engine's domain scoping, and result aggregation.

mod domain;

pub use domain::{domain_of, extract_domain, is_valid_url};
