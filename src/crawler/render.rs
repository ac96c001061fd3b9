//! Script-rendering fetch backend
//!
//! Loads pages in a headless Chromium so that content produced by JavaScript
//! is part of the text searched for the keyword. One browser is launched
//! lazily and shared by every fetch of the run; each fetch gets its own tab.

use crate::crawler::fetcher::{FetchedPage, PageFetcher};
use crate::FetchError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use url::Url;

/// Headless browser fetch backend
pub struct RenderedFetcher {
    browser: OnceCell<Browser>,
    timeout: Duration,
    user_agent: String,
}

impl RenderedFetcher {
    /// Creates a backend; the browser is started on first fetch
    pub fn new(user_agent: String, timeout: Duration) -> Self {
        Self {
            browser: OnceCell::new(),
            timeout,
            user_agent,
        }
    }

    async fn browser(&self) -> Result<&Browser, String> {
        self.browser
            .get_or_try_init(|| async {
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(self.timeout)
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()?;

                tracing::info!("Launching headless browser for rendered fetches");
                let (browser, mut handler) =
                    Browser::launch(config).await.map_err(|e| e.to_string())?;

                // The handler drives the CDP connection; it must be polled for
                // the browser to make progress.
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if event.is_err() {
                            break;
                        }
                    }
                });

                Ok(browser)
            })
            .await
    }

    /// Opens a tab with the configured user agent
    async fn open_tab(&self) -> Result<Page, String> {
        let browser = self.browser().await?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| e.to_string())?;
        if let Err(e) = page.set_user_agent(self.user_agent.as_str()).await {
            close_tab(page, self.timeout).await;
            return Err(e.to_string());
        }

        Ok(page)
    }
}

/// Navigates an open tab and returns its rendered HTML
async fn load(page: &Page, url: &Url) -> Result<String, String> {
    page.goto(url.as_str()).await.map_err(|e| e.to_string())?;
    page.content().await.map_err(|e| e.to_string())
}

/// Closes a tab, giving up after `timeout`
async fn close_tab(page: Page, timeout: Duration) {
    match tokio::time::timeout(timeout, page.close()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::debug!("Failed to close tab: {}", e),
        Err(_) => tracing::debug!("Timed out closing tab"),
    }
}

#[async_trait]
impl PageFetcher for RenderedFetcher {
    /// Renders one page within the fetch timeout
    ///
    /// Opening the tab, navigating and reading the content share one deadline.
    /// The tab is closed on every path once it exists, timeouts included.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let deadline = Instant::now() + self.timeout;
        let timed_out = || FetchError::Timeout {
            url: url.to_string(),
        };
        let render_error = |message| FetchError::Render {
            url: url.to_string(),
            message,
        };

        let page = tokio::time::timeout_at(deadline, self.open_tab())
            .await
            .map_err(|_| timed_out())?
            .map_err(render_error)?;

        let loaded = tokio::time::timeout_at(deadline, load(&page, url)).await;
        close_tab(page, self.timeout).await;

        let html = loaded.map_err(|_| timed_out())?.map_err(render_error)?;
        Ok(FetchedPage {
            url: url.clone(),
            html,
        })
    }

    fn name(&self) -> &'static str {
        "rendered"
    }
}
