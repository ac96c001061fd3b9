//! Integration tests for the HTTP fetch backend

use keyword_scout::config::UserAgentConfig;
use keyword_scout::crawler::{HttpFetcher, PageFetcher};
use keyword_scout::FetchError;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout: Duration) -> HttpFetcher {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: Some("https://example.com/contact".to_string()),
    };
    HttpFetcher::new(&user_agent, timeout).expect("Failed to build fetcher")
}

fn page_url(server: &MockServer, page: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), page)).expect("Failed to parse URL")
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Hello</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/page");
    let page = fetcher(Duration::from_secs(5))
        .fetch(&url)
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.url, url);
    assert_eq!(page.html, "<html><body>Hello</body></html>");
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher(Duration::from_secs(5));

    let gone = page_url(&mock_server, "/gone");
    assert_eq!(
        fetcher.fetch(&gone).await,
        Err(FetchError::Status {
            url: gone.to_string(),
            status: 404,
        })
    );

    let broken = page_url(&mock_server, "/broken");
    let error = fetcher.fetch(&broken).await.unwrap_err();
    assert_eq!(error.to_string(), format!("HTTP 500 for {}", broken));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/slow");
    let result = fetcher(Duration::from_millis(300)).fetch(&url).await;

    assert_eq!(
        result,
        Err(FetchError::Timeout {
            url: url.to_string(),
        })
    );
}

#[tokio::test]
async fn test_fetch_redirect_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/new"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/old");
    let page = fetcher(Duration::from_secs(5))
        .fetch(&url)
        .await
        .expect("Redirect should be followed");

    // The page keeps the requested URL
    assert_eq!(page.url, url);
    assert_eq!(page.html, "moved here");
}
