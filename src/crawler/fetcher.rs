//! Page fetching
//!
//! This module defines the fetch capability the crawl engine consumes and its
//! plain HTTP implementation:
//! - `PageFetcher`: one attempt to get a page's HTML, or a `FetchError`
//! - `HttpFetcher`: a single GET per page through a shared reqwest client
//! - Error classification (status, timeout, network)

use crate::config::UserAgentConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: Url,

    /// Page body (HTML)
    pub html: String,
}

/// Capability to fetch a page
///
/// Implementations make exactly one attempt per call and enforce their own
/// timeout. They are shared by every task of a crawl run.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Timeout of a whole request, connect included
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Plain HTTP fetch backend
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config, timeout)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Sends one GET request
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | `FetchedPage` with the decoded body |
    /// | Any other status | `FetchError::Status` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection refused, TLS, body read error | `FetchError::Network` |
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            url: url.clone(),
            html,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Maps a reqwest error onto the fetch error kinds
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.without_url().to_string(),
        }
    }
}
