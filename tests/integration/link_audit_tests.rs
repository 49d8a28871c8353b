//! Integration tests for page checks and the link auditor
//!
//! These tests serve a small FashionHub replica from wiremock and run the
//! site scenarios against it.

use fashionhub_e2e::audit::{audit_links, build_http_client, HttpLinkFetcher};
use fashionhub_e2e::browser::Session;
use fashionhub_e2e::config::Settings;
use fashionhub_e2e::scenarios::{
    link_status, navigation_visible, page_links, page_loads, ScenarioOutcome,
};
use fashionhub_e2e::E2eError;
use std::collections::HashMap;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates settings pointing the local environment at the mock server
fn create_test_settings(server: &MockServer, output: &TempDir) -> Settings {
    let mut env = HashMap::new();
    env.insert("ENV".to_string(), "local".to_string());
    env.insert(
        "BASE_URL_LOCAL".to_string(),
        format!("{}/fashionhub/", server.uri()),
    );
    env.insert(
        "OUTPUT_DIR".to_string(),
        output.path().to_string_lossy().into_owned(),
    );
    Settings::resolve(&env)
}

async fn mount_html(server: &MockServer, at: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_healthy_site(server: &MockServer) {
    mount_html(
        server,
        "/fashionhub/",
        200,
        r#"<html><head><title>Home - FashionHub</title></head><body>
            <header><nav>
                <a href="/fashionhub/">Home</a>
                <a href="products.html">Products</a>
                <a href="about.html?ref=nav#team">About</a>
            </nav></header>
            <a name="anchor-only">No href</a>
            <a href="/fashionhub/old-cart.html">Cart</a>
        </body></html>"#,
    )
    .await;
    mount_html(server, "/fashionhub/products.html", 200, "<html><title>Products</title></html>").await;
    mount_html(server, "/fashionhub/about.html", 200, "<html><title>About</title></html>").await;
    mount_html(server, "/fashionhub/cart.html", 200, "<html><title>Cart</title></html>").await;

    Mock::given(method("GET"))
        .and(path("/fashionhub/old-cart.html"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/fashionhub/cart.html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_page_loads_with_title() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_healthy_site(&server).await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let outcome = page_loads(&session, &settings).await.expect("page should load");
    assert_eq!(
        outcome,
        ScenarioOutcome::Passed("title \"Home - FashionHub\"".to_string())
    );
}

#[tokio::test]
async fn test_page_without_title_fails() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_html(&server, "/fashionhub/", 200, "<html><body>untitled</body></html>").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let result = page_loads(&session, &settings).await;
    assert!(matches!(result, Err(E2eError::Assertion(_))));
}

#[tokio::test]
async fn test_page_with_error_status_fails() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_html(&server, "/fashionhub/", 503, "<html><title>Down</title></html>").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let err = page_loads(&session, &settings).await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_navigation_visible() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_healthy_site(&server).await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    assert!(navigation_visible(&session, &settings).await.is_ok());
}

#[tokio::test]
async fn test_navigation_missing_fails() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_html(&server, "/fashionhub/", 200, "<html><title>T</title><body><p>Hi</p></body></html>").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    assert!(matches!(
        navigation_visible(&session, &settings).await,
        Err(E2eError::Assertion(_))
    ));
}

#[tokio::test]
async fn test_link_status_all_healthy() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_healthy_site(&server).await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let outcome = link_status(&session, &settings).await.expect("links should be healthy");
    assert_eq!(outcome, ScenarioOutcome::Passed("4 links healthy".to_string()));
}

#[tokio::test]
async fn test_audit_resolves_and_follows_redirects() {
    let server = MockServer::start().await;
    mount_healthy_site(&server).await;

    let base = format!("{}/fashionhub/", server.uri());
    let session = Session::new("TestBot/1.0").unwrap();
    let page = session.goto(&base).await.unwrap();

    let report = audit_links(&page.anchor_hrefs(), &base, &session.link_fetcher())
        .await
        .unwrap();

    let urls: Vec<&str> = report.results().iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/fashionhub/", server.uri()),
            format!("{}/fashionhub/products.html", server.uri()),
            format!("{}/fashionhub/about.html?ref=nav#team", server.uri()),
            format!("{}/fashionhub/old-cart.html", server.uri()),
        ]
    );
    // The redirect is followed to its 200 target
    assert!(report.results().iter().all(|r| r.status == 200));
    assert!((report.summary().success_rate() - 100.0).abs() < 0.01);
}

#[tokio::test]
async fn test_link_status_reports_broken_links() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_html(
        &server,
        "/fashionhub/",
        200,
        r#"<html><title>Home</title><body>
            <a href="products.html">Products</a>
            <a href="missing.html">Gone</a>
            <a href="/fashionhub/error.html">Error</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/fashionhub/products.html", 200, "ok").await;
    mount_html(&server, "/fashionhub/error.html", 500, "boom").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let err = link_status(&session, &settings).await.unwrap_err();
    let message = err.to_string();

    assert!(message.contains("2 of 3 links failed"), "{}", message);
    assert!(message.contains("missing.html (404)"), "{}", message);
    assert!(message.contains("error.html (500)"), "{}", message);
}

#[tokio::test]
async fn test_unreachable_link_recorded_not_raised() {
    let server = MockServer::start().await;
    mount_html(&server, "/fashionhub/ok.html", 200, "ok").await;

    let base = format!("{}/fashionhub/", server.uri());
    let fetcher = HttpLinkFetcher::new(build_http_client("TestBot/1.0").unwrap());
    let hrefs = vec![
        Some("http://127.0.0.1:9/unreachable".to_string()),
        Some("ok.html".to_string()),
    ];

    let report = audit_links(&hrefs, &base, &fetcher).await.unwrap();

    assert_eq!(report.results().len(), 2);
    assert_eq!(report.results()[0].status, 0);
    assert!(!report.results()[0].success);
    assert_eq!(report.results()[1].status, 200);
    assert_eq!(report.unreachable().count(), 1);
    assert_eq!(report.http_errors().count(), 0);
    assert!(report.ensure_healthy().is_err());
}

#[tokio::test]
async fn test_page_without_links() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_html(&server, "/fashionhub/", 200, "<html><title>Empty</title><body></body></html>").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let outcome = link_status(&session, &settings).await.unwrap();
    assert_eq!(outcome, ScenarioOutcome::Passed("0 links healthy".to_string()));
}

#[tokio::test]
async fn test_page_links_all_healthy() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_healthy_site(&server).await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let outcome = page_links(&session, &settings).await.expect("links should be healthy");
    assert_eq!(outcome, ScenarioOutcome::Passed("4 links healthy".to_string()));
}

#[tokio::test]
async fn test_page_links_fails_on_broken_link() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_html(
        &server,
        "/fashionhub/",
        200,
        r#"<html><title>Home</title><body>
            <a href="products.html">Products</a>
            <a href="/fashionhub/missing.html">Gone</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/fashionhub/products.html", 200, "ok").await;

    let settings = create_test_settings(&server, &output);
    let session = Session::new("TestBot/1.0").unwrap();

    let err = page_links(&session, &settings).await.unwrap_err();
    assert!(err.to_string().contains("missing.html (404)"), "{}", err);
}
