//! Output module for crawl results
//!
//! This module handles:
//! - Aggregating found pages and errors into a `CrawlReport`
//! - Writing the found-pages, found-domains, error-domains and
//!   not-found-domains CSV tables
//! - Printing a console summary of a run

mod csv_output;
mod report;

pub use csv_output::{
    write_domains, write_error_domains, write_found_pages, write_report, ERROR_SEPARATOR,
};
pub use report::{print_report, CrawlReport};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
