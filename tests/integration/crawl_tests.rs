//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use keyword_scout::config::{
    Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig, VisitedScope,
};
use keyword_scout::crawler::{run_crawl, Coordinator, HttpFetcher, INVALID_SEED_KEY};
use keyword_scout::output::write_report;
use keyword_scout::FoundPage;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing its outputs into `dir`
fn create_test_config(keyword: &str, max_depth: u32, dir: &TempDir) -> Config {
    let out = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
    Config {
        crawler: CrawlerConfig {
            keyword: keyword.to_string(),
            max_depth,
            max_workers_per_node: 3,
            max_concurrent_fetches: 8,
            fetch_timeout_seconds: 5.0,
            use_rendered_fetch: false,
            visited_scope: VisitedScope::Run,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        input: InputConfig {
            seeds_path: out("seeds.csv"),
        },
        output: OutputConfig {
            found_pages_path: out("found_pages.csv"),
            found_domains_path: out("found_domains.csv"),
            error_domains_path: out("error_domains.csv"),
            not_found_domains_path: Some(out("not_found_domains.csv")),
        },
    }
}

/// Domain of a mock server, e.g. "127.0.0.1:12345"
fn server_domain(server: &MockServer) -> String {
    server.address().to_string()
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(title, body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<p>Welcome</p>
        <a href="/lecterns">Lecterns</a>
        <a href="/about#team">About</a>
        <a href="/about">About again</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/lecterns",
        "Lecterns",
        r#"<p>Our LECTERN range</p><a href="/">Home</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        "About",
        r#"<p>Family run since 1990</p><a href="/deep">Deep</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/deep",
        "Deep",
        r#"<p>A lectern in the archive</p>"#,
    )
    .await;

    let config = create_test_config("lectern", 2, &dir);
    let report = run_crawl(&config, &[format!("{}/", base_url)])
        .await
        .expect("Crawl should succeed");

    // Children merge in link order: /about (and its /deep) before /lecterns
    assert_eq!(
        report.found_pages,
        vec![
            FoundPage {
                url: format!("{}/deep", base_url),
                title: "Deep".to_string(),
            },
            FoundPage {
                url: format!("{}/lecterns", base_url),
                title: "Lecterns".to_string(),
            },
        ]
    );
    assert!(report.found_domains.contains(&server_domain(&mock_server)));
    assert!(report.not_found_domains.is_empty());
    assert!(report.errors.is_empty());
    assert_eq!(report.pages_fetched, 4);
}

#[tokio::test]
async fn test_depth_limit_respected() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", "Home", r#"<a href="/one">One</a>"#).await;
    mount_page(&mock_server, "/one", "One", r#"<a href="/two">Two</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(html_page("Two", "lectern"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config("lectern", 1, &dir);
    let report = run_crawl(&config, &[format!("{}/", mock_server.uri())])
        .await
        .unwrap();

    assert!(report.found_pages.is_empty());
    assert_eq!(
        report.not_found_domains.iter().cloned().collect::<Vec<_>>(),
        vec![server_domain(&mock_server)]
    );
}

#[tokio::test]
async fn test_cross_domain_links_not_followed() {
    let home_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &home_server,
        "/",
        "Home",
        &format!(
            r#"<p>lectern</p><a href="{}/elsewhere">Elsewhere</a>"#,
            other_server.uri()
        ),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(html_page("Elsewhere", "lectern"))
        .expect(0)
        .mount(&other_server)
        .await;

    let config = create_test_config("lectern", 2, &dir);
    let report = run_crawl(&config, &[format!("{}/", home_server.uri())])
        .await
        .unwrap();

    assert_eq!(report.found_pages.len(), 1);
    assert_eq!(report.pages_fetched, 1);
}

#[tokio::test]
async fn test_failing_pages_logged_per_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<p>lectern</p><a href="/missing">Missing</a><a href="/broken">Broken</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // Unmatched requests get wiremock's default 404
    let config = create_test_config("lectern", 2, &dir);
    let report = run_crawl(&config, &[format!("{}/", base_url)])
        .await
        .unwrap();

    assert_eq!(report.found_pages.len(), 1);

    let messages = &report.errors[&server_domain(&mock_server)];
    assert_eq!(messages.len(), 2);
    assert!(messages.contains(&format!("HTTP 404 for {}/missing", base_url)));
    assert!(messages.contains(&format!("HTTP 500 for {}/broken", base_url)));
}

#[tokio::test]
async fn test_unreachable_seed_reported() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config("lectern", 2, &dir);
    let report = run_crawl(&config, &[format!("{}/", mock_server.uri()), "::bad::".to_string()])
        .await
        .unwrap();

    let domain = server_domain(&mock_server);
    assert!(report.found_pages.is_empty());
    assert!(report.not_found_domains.contains(&domain));
    assert!(report.errors.contains_key(&domain));
    assert!(report.errors[INVALID_SEED_KEY]
        .iter()
        .any(|m| m.starts_with("invalid seed URL '::bad::'")));
}

#[tokio::test]
async fn test_shared_pages_fetched_once_across_seeds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/a", "A", r#"<a href="/shared">Shared</a>"#).await;
    mount_page(&mock_server, "/b", "B", r#"<a href="/shared">Shared</a>"#).await;
    mount_page(&mock_server, "/shared", "Shared", "lectern").await;

    let config = create_test_config("lectern", 1, &dir);
    let fetcher = Arc::new(
        HttpFetcher::new(&config.user_agent, Duration::from_secs(5)).unwrap(),
    );
    let coordinator = Coordinator::new(&config.crawler, fetcher);

    let report = coordinator
        .run(&[format!("{}/a", base_url), format!("{}/b", base_url)])
        .await;

    assert_eq!(report.found_pages.len(), 1);
    assert_eq!(report.pages_fetched, 3);
}

#[tokio::test]
async fn test_results_written_to_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Podiums, Lecterns",
        r#"<p>lectern</p><a href="/gone">Gone</a>"#,
    )
    .await;

    let config = create_test_config("lectern", 1, &dir);
    let report = run_crawl(&config, &[format!("{}/", base_url)])
        .await
        .unwrap();
    write_report(&report, &config.output).expect("Failed to write results");

    let read = |p: &str| std::fs::read_to_string(p).unwrap();
    let domain = server_domain(&mock_server);

    assert_eq!(
        read(&config.output.found_pages_path),
        format!("url,title\n{}/,\"Podiums, Lecterns\"\n", base_url)
    );
    assert_eq!(
        read(&config.output.found_domains_path),
        format!("domain\n{}\n", domain)
    );
    assert_eq!(
        read(&config.output.error_domains_path),
        format!("domain,errors\n{},HTTP 404 for {}/gone\n", domain, base_url)
    );
    assert_eq!(
        read(config.output.not_found_domains_path.as_deref().unwrap()),
        "domain\n"
    );
}
