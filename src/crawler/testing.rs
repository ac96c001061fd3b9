//! In-memory fetch backend for engine and coordinator tests

use crate::crawler::fetcher::{FetchedPage, PageFetcher};
use crate::url::domain_of;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

enum Response {
    Html(String),
    Status(u16),
}

/// Serves a fixed link graph and counts fetches per URL
///
/// URLs without a registered response answer with HTTP 404.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Response>,
    fetches: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page; `links` are written as `<a href>` verbatim
    pub fn page(mut self, url: &str, title: &str, text: &str, links: &[&str]) -> Self {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        let html = format!(
            "<html><head><title>{}</title></head><body><p>{}</p>{}</body></html>",
            title, text, anchors
        );
        self.responses.insert(key(url), Response::Html(html));
        self
    }

    /// Registers a URL that answers with an error status
    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(key(url), Response::Status(status));
        self
    }

    /// Makes every fetch take at least `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.counts().get(&key(url)).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.counts().values().sum()
    }

    pub fn max_fetch_count(&self) -> usize {
        self.counts().values().copied().max().unwrap_or(0)
    }

    pub fn fetched_domains(&self) -> BTreeSet<String> {
        self.counts().keys().filter_map(|url| domain_of(url)).collect()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn counts(&self) -> HashMap<String, usize> {
        self.fetches.lock().unwrap().clone()
    }
}

fn key(url: &str) -> String {
    Url::parse(url).unwrap().to_string()
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(url.as_str()) {
            Some(Response::Html(html)) => Ok(FetchedPage {
                url: url.clone(),
                html: html.clone(),
            }),
            Some(Response::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
