//! CSV result tables
//!
//! Every table is written with its header row, even when it has no data rows,
//! so a run always leaves its outputs behind.

use crate::config::OutputConfig;
use crate::crawler::FoundPage;
use crate::output::report::CrawlReport;
use crate::output::{OutputError, OutputResult};
use crate::state::ErrorSnapshot;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Separator between messages in the error-domains table
pub const ERROR_SEPARATOR: &str = "; ";

/// Writes found pages as `url,title`
pub fn write_found_pages<W: Write>(writer: W, pages: &[FoundPage]) -> OutputResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["url", "title"])?;
    for page in pages {
        csv.write_record([page.url.as_str(), page.title.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes a domain list as a single `domain` column
pub fn write_domains<W: Write>(writer: W, domains: &BTreeSet<String>) -> OutputResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["domain"])?;
    for domain in domains {
        csv.write_record([domain.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the error log as `domain,errors` with messages joined by `"; "`
pub fn write_error_domains<W: Write>(writer: W, errors: &ErrorSnapshot) -> OutputResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["domain", "errors"])?;
    for (domain, messages) in errors {
        let joined = messages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(ERROR_SEPARATOR);
        csv.write_record([domain.as_str(), joined.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes every table of a report to the configured paths
pub fn write_report(report: &CrawlReport, config: &OutputConfig) -> OutputResult<()> {
    write_found_pages(create(&config.found_pages_path)?, &report.found_pages)?;
    write_domains(create(&config.found_domains_path)?, &report.found_domains)?;
    write_error_domains(create(&config.error_domains_path)?, &report.errors)?;

    if let Some(path) = &config.not_found_domains_path {
        write_domains(create(path)?, &report.not_found_domains)?;
    }

    tracing::info!(
        "Wrote {} found pages to {}",
        report.found_pages.len(),
        config.found_pages_path
    );
    Ok(())
}

fn create(path: &str) -> OutputResult<std::fs::File> {
    std::fs::File::create(Path::new(path))
        .map_err(|e| OutputError::Write(format!("Failed to create {}: {}", path, e)))
}
