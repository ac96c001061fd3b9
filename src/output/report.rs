//! Crawl report and console summary
//!
//! The report is the aggregate of a whole run: every found page plus the
//! domain-level views derived from them, and the error log contents.

use crate::crawler::FoundPage;
use crate::state::ErrorSnapshot;
use crate::url::domain_of;
use std::collections::BTreeSet;

/// Aggregated results of a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// All matching pages, in seed order then link order
    pub found_pages: Vec<FoundPage>,

    /// Domains of the found pages
    pub found_domains: BTreeSet<String>,

    /// Domains of the (valid) seed URLs
    pub input_domains: BTreeSet<String>,

    /// Input domains without any found page
    pub not_found_domains: BTreeSet<String>,

    /// Distinct error messages per domain
    pub errors: ErrorSnapshot,

    /// Number of URLs claimed for fetching during the run
    pub pages_fetched: usize,
}

impl CrawlReport {
    /// Builds a report, deriving the domain sets
    ///
    /// # Arguments
    ///
    /// * `found_pages` - Matching pages from every seed
    /// * `input_domains` - Domains of the seeds that were crawled
    /// * `errors` - Snapshot of the run's error log
    /// * `pages_fetched` - URLs claimed during the run
    pub fn new(
        found_pages: Vec<FoundPage>,
        input_domains: BTreeSet<String>,
        errors: ErrorSnapshot,
        pages_fetched: usize,
    ) -> Self {
        let found_domains: BTreeSet<String> = found_pages
            .iter()
            .filter_map(|page| domain_of(&page.url))
            .collect();

        let not_found_domains = input_domains
            .difference(&found_domains)
            .cloned()
            .collect();

        Self {
            found_pages,
            found_domains,
            input_domains,
            not_found_domains,
            errors,
            pages_fetched,
        }
    }

    /// Total number of distinct error messages
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(BTreeSet::len).sum()
    }
}

/// Prints a report summary to stdout
pub fn print_report(report: &CrawlReport, keyword: &str) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Keyword: {}", keyword);
    println!("  Input domains: {}", report.input_domains.len());
    println!("  Pages fetched: {}", report.pages_fetched);
    println!("  Pages with keyword: {}", report.found_pages.len());
    println!("  Errors: {}", report.total_errors());
    println!();

    if !report.found_domains.is_empty() {
        println!("Found Domains ({}):", report.found_domains.len());
        for domain in &report.found_domains {
            let count = report
                .found_pages
                .iter()
                .filter(|page| domain_of(&page.url).as_deref() == Some(domain.as_str()))
                .count();
            println!("  - {} ({} pages)", domain, count);
        }
        println!();
    }

    if !report.not_found_domains.is_empty() {
        println!("Not Found Domains ({}):", report.not_found_domains.len());
        for domain in &report.not_found_domains {
            println!("  - {}", domain);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Error Domains ({}):", report.errors.len());
        for (domain, messages) in &report.errors {
            println!("  - {}: {} errors", domain, messages.len());
        }
        println!();
    }

    if report.found_pages.is_empty() {
        println!("No pages found containing '{}'.", keyword);
    }
}
