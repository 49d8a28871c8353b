//! Integration tests for the pull-request fetcher and CSV export scenarios
//!
//! A wiremock server stands in for the GitHub repositories API.

use fashionhub_e2e::config::Settings;
use fashionhub_e2e::github::{
    FetchOutcome, PrState, PullRequestClient, StateFilter, ACCEPT_MEDIA_TYPE, USER_AGENT,
};
use fashionhub_e2e::output::{artifacts, read_file, CsvDocument, PR_HEADER, PR_HEADER_WITH_STATE};
use fashionhub_e2e::scenarios::{
    export_all_pull_requests, export_open_pull_requests, validate_sample_csv, ScenarioOutcome,
};
use fashionhub_e2e::E2eError;
use serde_json::{json, Value};
use std::collections::HashMap;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "appwrite/appwrite";
const PULLS_PATH: &str = "/repos/appwrite/appwrite/pulls";

fn create_test_settings(server: &MockServer, output: &TempDir) -> Settings {
    let mut env = HashMap::new();
    env.insert("GITHUB_API_URL".to_string(), format!("{}/repos", server.uri()));
    env.insert("GITHUB_REPO".to_string(), REPO.to_string());
    env.insert(
        "OUTPUT_DIR".to_string(),
        output.path().to_string_lossy().into_owned(),
    );
    env.insert(
        "CSV_OUTPUT_FILE".to_string(),
        output
            .path()
            .join("pull-requests.csv")
            .to_string_lossy()
            .into_owned(),
    );
    Settings::resolve(&env)
}

fn pull_request(number: u32, title: &str, login: &str, state: &str) -> Value {
    json!({
        "id": 1000 + number,
        "number": number,
        "title": title,
        "created_at": format!("2025-10-0{}T10:00:00Z", number % 9 + 1),
        "user": { "login": login, "id": number, "type": "User" },
        "html_url": format!("https://github.com/{}/pull/{}", REPO, number),
        "state": state,
        "draft": false,
        "labels": []
    })
}

async fn mount_pulls(server: &MockServer, state: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("state", state))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_sends_required_headers_and_parses_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("state", "open"))
        .and(query_param("per_page", "100"))
        .and(header("accept", ACCEPT_MEDIA_TYPE))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pull_request(1, "Fix login redirect", "alice", "open"),
            pull_request(2, "Add cart badge", "bob", "open"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let outcome = client
        .fetch_pull_requests(REPO, StateFilter::Open, 100)
        .await
        .unwrap();

    let records = outcome.into_records().expect("should not be rate limited");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Fix login redirect");
    assert_eq!(records[0].author_login, "alice");
    assert_eq!(records[1].html_url, "https://github.com/appwrite/appwrite/pull/2");
    assert_eq!(records[1].state, PrState::Open);
}

#[tokio::test]
async fn test_forbidden_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/repo/pulls"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let outcome = client
        .fetch_pull_requests("org/repo", StateFilter::Open, 100)
        .await
        .expect("403 should not be an error");

    assert_eq!(outcome, FetchOutcome::RateLimited);
    assert_eq!(outcome.into_records(), None);
}

#[tokio::test]
async fn test_server_error_is_fatal() {
    let server = MockServer::start().await;
    mount_pulls(&server, "open", ResponseTemplate::new(500)).await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let err = client
        .fetch_pull_requests(REPO, StateFilter::Open, 100)
        .await
        .unwrap_err();

    match err {
        E2eError::Api {
            status,
            status_text,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_fatal() {
    let server = MockServer::start().await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let err = client
        .fetch_pull_requests("missing/repo", StateFilter::All, 10)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "GitHub API request failed: 404 Not Found");
}

#[tokio::test]
async fn test_missing_required_field_is_decode_error() {
    let server = MockServer::start().await;
    mount_pulls(
        &server,
        "open",
        ResponseTemplate::new(200).set_body_json(json!([
            {"title": "No user", "created_at": "2025-10-01T00:00:00Z", "html_url": "https://x", "state": "open"}
        ])),
    )
    .await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let result = client.fetch_pull_requests(REPO, StateFilter::Open, 100).await;

    assert!(matches!(result, Err(E2eError::Decode { .. })));
}

#[tokio::test]
async fn test_invalid_timestamp_is_rejected() {
    let server = MockServer::start().await;
    let mut pr = pull_request(1, "Bad date", "alice", "open");
    pr["created_at"] = json!("last tuesday");
    mount_pulls(&server, "open", ResponseTemplate::new(200).set_body_json(json!([pr]))).await;

    let client = PullRequestClient::new(format!("{}/repos", server.uri())).unwrap();
    let result = client.fetch_pull_requests(REPO, StateFilter::Open, 100).await;

    assert!(matches!(result, Err(E2eError::InvalidRecord(_))));
}

#[tokio::test]
async fn test_export_open_matches_repo_name_case_insensitively() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/repos/AppWrite/AppWrite/pulls"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pull_request(
            7, "Fix docs", "alice", "open"
        )])))
        .mount(&server)
        .await;

    let mut settings = create_test_settings(&server, &output);
    settings.github_repo = "AppWrite/AppWrite".to_string();
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = export_open_pull_requests(&client, &settings).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Passed("1 open pull requests exported".to_string())
    );
}

#[tokio::test]
async fn test_export_open_pull_requests_round_trip() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_pulls(
        &server,
        "open",
        ResponseTemplate::new(200).set_body_json(json!([
            pull_request(1, "Support \"quoted\" titles, with commas", "alice", "open"),
            pull_request(2, "Plain title", "bob", "open"),
            pull_request(3, "Third", "carol", "open"),
        ])),
    )
    .await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = export_open_pull_requests(&client, &settings).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Passed("3 open pull requests exported".to_string())
    );

    let content = read_file(&settings.csv_output_file).unwrap();
    assert!(content.starts_with("PR Name,Created Date,Author,URL\n"));
    assert!(content.contains("\"Support \"\"quoted\"\" titles, with commas\""));
    assert!(content.contains("appwrite"));
    assert_eq!(content.lines().count(), 4);

    let parsed = CsvDocument::parse(&content).unwrap();
    assert_eq!(parsed.header(), &PR_HEADER.map(String::from));
    assert_eq!(parsed.rows()[0][0], "Support \"quoted\" titles, with commas");
    assert_eq!(parsed.rows()[2][2], "carol");
}

#[tokio::test]
async fn test_export_open_skips_when_rate_limited() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_pulls(&server, "open", ResponseTemplate::new(403)).await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = export_open_pull_requests(&client, &settings).await.unwrap();

    assert!(outcome.is_skipped());
    assert!(!settings.csv_output_file.exists());
}

#[tokio::test]
async fn test_export_all_pull_requests_with_state() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_pulls(
        &server,
        "all",
        ResponseTemplate::new(200).set_body_json(json!([
            pull_request(1, "Open one", "alice", "open"),
            pull_request(2, "Closed one", "bob", "closed"),
            pull_request(3, "Closed two", "carol", "closed"),
        ])),
    )
    .await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = export_all_pull_requests(&client, &settings).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Passed("3 pull requests exported (1 open, 2 closed)".to_string())
    );

    let content = read_file(&settings.artifact_path(artifacts::ALL_PULL_REQUESTS)).unwrap();
    let parsed = CsvDocument::parse(&content).unwrap();
    assert_eq!(parsed.header(), &PR_HEADER_WITH_STATE.map(String::from));
    let states: Vec<&str> = parsed.rows().iter().map(|row| row[4].as_str()).collect();
    assert_eq!(states, vec!["open", "closed", "closed"]);
}

#[tokio::test]
async fn test_export_all_fails_without_pull_requests() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_pulls(&server, "all", ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let result = export_all_pull_requests(&client, &settings).await;
    assert!(matches!(result, Err(E2eError::Assertion(_))));
}

#[tokio::test]
async fn test_validate_sample_csv() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("state", "open"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pull_request(1, "One", "alice", "open"),
            pull_request(2, "Two", "bob", "open"),
        ])))
        .mount(&server)
        .await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = validate_sample_csv(&client, &settings).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Passed("2 sample rows validated".to_string())
    );

    let path = settings.artifact_path(artifacts::SAMPLE_PULL_REQUESTS);
    assert_eq!(read_file(&path).unwrap().lines().count(), 3);
}

#[tokio::test]
async fn test_validate_sample_csv_skips_without_open_pull_requests() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_pulls(&server, "open", ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let settings = create_test_settings(&server, &output);
    let client = PullRequestClient::from_settings(&settings).unwrap();

    let outcome = validate_sample_csv(&client, &settings).await.unwrap();
    assert!(outcome.is_skipped());
}
