//! State module for tracking crawl progress
//!
//! The two structures in this module are the only state mutated by many crawl
//! tasks at once. Each is owned by one crawl run and handed to every task
//! behind an `Arc`.
//!
//! # Components
//!
//! - `VisitedSet`: URLs already claimed for fetching
//! - `ErrorLog`: distinct fetch failure messages per domain

mod error_log;
mod visited;

// Re-export main types
pub use error_log::{ErrorLog, ErrorSnapshot};
pub use visited::VisitedSet;
