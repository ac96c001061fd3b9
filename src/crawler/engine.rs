//! Crawl engine - recursive keyword search below one seed
//!
//! Each claimed URL goes through the same steps:
//!
//! 1. Stop if the task is deeper than the configured maximum
//! 2. Claim the URL in the visited ledger; stop if someone else has it
//! 3. Fetch the page; on failure log the error under the URL's domain and stop
//! 4. Record a `FoundPage` if the page text contains the keyword
//! 5. Below the maximum depth, collect the page's same-domain, unvisited links
//! 6. Visit those links as child tasks, at most `max_workers_per_node` at a time
//! 7. Return this page's match followed by the children's results in link order
//!
//! Child visits run on their own tokio tasks. Fetches are additionally bounded
//! run-wide by a semaphore so nested fan-outs cannot open more than
//! `max_concurrent_fetches` requests at once.
//!
//! Results are deterministic when every page has a single shortest path from
//! the seed. If sibling branches reach the same URL at different depths, the
//! first branch to claim it wins, so with a tight depth limit the set of
//! pages found below that URL can differ between runs.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{contains_keyword, parse_html};
use crate::state::{ErrorLog, VisitedSet};
use crate::url::extract_domain;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// A URL selected for visiting, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: Url,
    pub depth: u32,
}

/// A page whose text contains the keyword
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoundPage {
    pub url: String,
    pub title: String,
}

/// Engine limits, derived from the crawler configuration
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Keyword, lowercased once
    pub keyword: String,
    pub max_depth: u32,
    pub max_workers_per_node: usize,
    pub max_concurrent_fetches: usize,
}

impl From<&CrawlerConfig> for EngineSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            keyword: config.keyword.to_lowercase(),
            max_depth: config.max_depth,
            max_workers_per_node: config.max_workers_per_node.max(1) as usize,
            max_concurrent_fetches: config.max_concurrent_fetches.max(1) as usize,
        }
    }
}

/// Recursive, bounded-concurrency crawler for a single domain tree
///
/// Cheap to clone: all state is shared. The error log is owned by the crawl
/// run and injected here; the visited ledger is passed per crawl so the caller
/// decides its scope.
#[derive(Clone)]
pub struct CrawlEngine {
    fetcher: Arc<dyn PageFetcher>,
    settings: Arc<EngineSettings>,
    fetch_permits: Arc<Semaphore>,
    errors: Arc<ErrorLog>,
}

impl CrawlEngine {
    /// Creates an engine
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetch backend shared by all tasks
    /// * `settings` - Keyword and limits
    /// * `errors` - Run-wide error log receiving fetch failures
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        settings: EngineSettings,
        errors: Arc<ErrorLog>,
    ) -> Self {
        let fetch_permits = Arc::new(Semaphore::new(settings.max_concurrent_fetches));
        Self {
            fetcher,
            settings: Arc::new(settings),
            fetch_permits,
            errors,
        }
    }

    /// The error log this engine records into
    pub fn errors(&self) -> &Arc<ErrorLog> {
        &self.errors
    }

    /// Crawls from a seed URL at depth 0
    ///
    /// Returns every matching page reachable from the seed within the depth
    /// limit without leaving the seed's domain, skipping URLs already in
    /// `visited`. Never fails: fetch errors end up in the error log.
    pub async fn crawl(&self, seed: Url, visited: Arc<VisitedSet>) -> Vec<FoundPage> {
        self.clone()
            .visit(CrawlTask { url: seed, depth: 0 }, visited)
            .await
    }

    /// Visits one task and, recursively, its children
    fn visit(
        self,
        task: CrawlTask,
        visited: Arc<VisitedSet>,
    ) -> BoxFuture<'static, Vec<FoundPage>> {
        async move {
            if task.depth > self.settings.max_depth {
                tracing::trace!("Depth {} exceeded for {}", task.depth, task.url);
                return Vec::new();
            }

            if !visited.try_claim(task.url.as_str()) {
                tracing::trace!("Already visited: {}", task.url);
                return Vec::new();
            }

            let domain = extract_domain(&task.url).unwrap_or_default();
            tracing::info!(depth = task.depth, "Crawling {}", task.url);

            let page = {
                let Ok(_permit) = self.fetch_permits.acquire().await else {
                    return Vec::new();
                };
                match self.fetcher.fetch(&task.url).await {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!("Fetch failed: {}", e);
                        self.errors.record(&domain, e.to_string());
                        return Vec::new();
                    }
                }
            };

            // Links resolve against the page's own URL, not the seed
            let parsed = parse_html(&page.html, &task.url);

            let mut found = Vec::new();
            if contains_keyword(&parsed.text, &self.settings.keyword) {
                tracing::info!("Found keyword at {}", task.url);
                found.push(FoundPage {
                    url: task.url.to_string(),
                    title: parsed.title,
                });
            }

            if task.depth >= self.settings.max_depth {
                return found;
            }

            let children: Vec<CrawlTask> = parsed
                .links
                .iter()
                .filter_map(|link| Url::parse(link).ok())
                .filter(|link| extract_domain(link).as_deref() == Some(domain.as_str()))
                .filter(|link| !visited.contains(link.as_str()))
                .map(|url| CrawlTask {
                    url,
                    depth: task.depth + 1,
                })
                .collect();

            tracing::debug!(
                "{} child links to visit from {} (depth {})",
                children.len(),
                task.url,
                task.depth
            );

            let workers = self.settings.max_workers_per_node;
            let results: Vec<_> = stream::iter(children)
                .map(|child| {
                    let url = child.url.clone();
                    let handle = tokio::spawn(self.clone().visit(child, Arc::clone(&visited)));
                    handle.map(move |result| (url, result))
                })
                .buffered(workers)
                .collect()
                .await;

            for (url, result) in results {
                match result {
                    Ok(pages) => found.extend(pages),
                    Err(e) => tracing::error!("Crawl task for {} failed: {}", url, e),
                }
            }

            found
        }
        .boxed()
    }
}
