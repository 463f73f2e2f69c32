//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end with the real HTTP fetcher and HTML extractor.

use std::time::Duration;
use sumi_linkcheck::config::Config;
use sumi_linkcheck::crawler::{crawl, Coordinator};
use sumi_linkcheck::output::{JsonReport, OutputHandler};
use sumi_linkcheck::url::{normalize, parse_seed};
use sumi_linkcheck::{FailureReason, SumiError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short fetch timeout
fn create_test_config(workers: u32, timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.crawler.workers = Some(workers);
    config.crawler.fetch_timeout_secs = timeout_secs;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

/// Mounts an HTML page at `page_path` that must be requested exactly `times`
async fn mount_page(server: &MockServer, page_path: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(times)
        .mount(server)
        .await;
}

fn seed_of(server: &MockServer) -> url::Url {
    parse_seed(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

fn visited_paths(result: &sumi_linkcheck::CrawlResult) -> Vec<String> {
    result
        .visited()
        .iter()
        .map(|u| u.as_url().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/page1">Page 1</a><a href="/page2">Page 2</a><a href="/missing">Gone</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/page1", r#"<a href="/">Home</a>"#, 1).await;
    mount_page(&server, "/page2", r#"<a href="page1">Sibling</a>"#, 1).await;
    // "/missing" falls through to wiremock's default 404

    let seed = seed_of(&server);
    let result = crawl(&create_test_config(4, 5), &seed)
        .await
        .expect("Crawl should complete");

    assert_eq!(
        visited_paths(&result),
        vec!["/", "/missing", "/page1", "/page2"]
    );
    assert_eq!(result.broken_count(), 1);

    let broken = &result.broken_links()[0];
    assert_eq!(broken.url.as_url().path(), "/missing");
    assert_eq!(broken.reason, FailureReason::NonSuccessStatus(404));
}

#[tokio::test]
async fn test_fragment_and_trailing_slash_collapse() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r##"<a href="/about#team">Team</a>
            <a href="/about/">About</a>
            <a href="/about">About again</a>
            <a href="#top">Top</a>"##,
        1,
    )
    .await;
    mount_page(&server, "/about", r#"<a href="/about/#history">History</a>"#, 1).await;

    let result = crawl(&create_test_config(8, 5), &seed_of(&server))
        .await
        .unwrap();

    assert_eq!(result.total_visited(), 2);
    assert_eq!(result.broken_count(), 0);
    // Mock expectations verify each page was fetched once
}

#[tokio::test]
async fn test_off_domain_links_never_visited() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("elsewhere"))
        .expect(0)
        .mount(&other)
        .await;

    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="{}/outside">Other port</a><a href="https://example.org/">Other host</a><a href="/inside">In</a>"#,
            other.uri()
        ),
        1,
    )
    .await;
    mount_page(&server, "/inside", "leaf", 1).await;

    let result = crawl(&create_test_config(2, 5), &seed_of(&server))
        .await
        .unwrap();

    assert_eq!(visited_paths(&result), vec!["/", "/inside"]);
    assert!(result
        .visited()
        .iter()
        .all(|u| u.as_url().port() == seed_of(&server).port()));
}

#[tokio::test]
async fn test_timeout_recorded_and_not_retried() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/fast", r#"<a href="/slow">Slow again</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("late").set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&server)
        .await;

    let result = crawl(&create_test_config(4, 1), &seed_of(&server))
        .await
        .unwrap();

    assert_eq!(result.total_visited(), 3);
    assert_eq!(result.broken_count(), 1);
    assert_eq!(result.broken_links()[0].url.as_url().path(), "/slow");
    assert_eq!(result.broken_links()[0].reason, FailureReason::Timeout);
}

#[tokio::test]
async fn test_cycles_terminate() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r##"<a href="/a">A</a><a href="/#top">Self</a>"##, 1).await;
    mount_page(&server, "/a", r#"<a href="/b">B</a><a href="/">Home</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/a">A</a><a href="/b">Self</a>"#, 1).await;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        crawl(&create_test_config(16, 5), &seed_of(&server)),
    )
    .await
    .expect("Crawl should terminate")
    .unwrap();

    assert_eq!(visited_paths(&result), vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_redirect_followed_by_fetcher() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/old">Old</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/new", "landed", 1).await;

    let result = crawl(&create_test_config(2, 5), &seed_of(&server))
        .await
        .unwrap();

    // The redirect target is not a separate frontier entry
    assert_eq!(visited_paths(&result), vec!["/", "/old"]);
    assert_eq!(result.broken_count(), 0);
}

#[tokio::test]
async fn test_server_errors_isolated() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/broken">B</a><a href="/ok">OK</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", r#"<a href="/ok/child">Child</a>"#, 1).await;
    mount_page(&server, "/ok/child", "leaf", 1).await;

    let result = crawl(&create_test_config(3, 5), &seed_of(&server))
        .await
        .unwrap();

    assert_eq!(result.total_visited(), 4);
    assert_eq!(result.broken_count(), 1);
    assert_eq!(
        result.broken_links()[0].reason,
        FailureReason::NonSuccessStatus(500)
    );
    assert!(result.was_visited(&normalize("/ok/child", &seed_of(&server)).unwrap()));
}

#[tokio::test]
async fn test_unreachable_seed_is_fatal() {
    // Reserve a free port, then release it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let seed = parse_seed(&format!("http://127.0.0.1:{}/", port)).unwrap();

    let err = crawl(&create_test_config(2, 2), &seed).await.unwrap_err();

    assert!(matches!(
        err,
        SumiError::SeedUnreachable {
            reason: FailureReason::NetworkError(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_seed_error_status_is_a_broken_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = crawl(&create_test_config(2, 5), &seed_of(&server))
        .await
        .unwrap();

    assert_eq!(result.total_visited(), 1);
    assert_eq!(
        result.broken_links()[0].reason,
        FailureReason::NonSuccessStatus(403)
    );
}

#[tokio::test]
async fn test_crawl_writes_json_report() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/gone">Gone</a>"#, 1).await;

    let config = create_test_config(2, 5);
    let coordinator = Coordinator::from_config(&config).unwrap();
    let result = coordinator.crawl(&seed_of(&server)).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let report = JsonReport::new(dir.path().join("broken_links.json"));
    report.write(&result).unwrap();

    let content = std::fs::read_to_string(report.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    let broken = value["broken_links"].as_array().unwrap();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0]["url"], format!("{}/gone", server.uri()));
    assert_eq!(broken[0]["reason"], "HTTP 404");
    assert_eq!(value["total_visited"], 2);
}
