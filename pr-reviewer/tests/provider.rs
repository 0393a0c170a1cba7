//! Change-set fetcher behavior against a local fake of the hosting API.

mod common;

use common::*;
use pr_reviewer::errors::{Error, ProviderError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILES_PATH: &str = "/repos/octo/demo/pulls/7/files";

#[tokio::test]
async fn paginates_until_a_short_page_preserving_order() {
    let page1: Vec<String> = (0..100).map(|i| format!("src/f{i}.rs")).collect();
    let page1_refs: Vec<&str> = page1.iter().map(String::as_str).collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(query_param("page", "1"))
        .respond_with(files_page(&page1_refs))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(query_param("page", "2"))
        .respond_with(files_page(&["src/last.rs"]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = review_cfg(&server.uri(), dir.path());
    let files = github_client(&cfg).get_changed_files(&pr(7)).await.unwrap();

    assert_eq!(files.len(), 101);
    assert_eq!(files[0].path, "src/f0.rs");
    assert_eq!(files[100].path, "src/last.rs");
}

#[tokio::test]
async fn sends_auth_and_api_version_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(files_page(&["a.py"]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = review_cfg(&server.uri(), dir.path());
    let files = github_client(&cfg).get_changed_files(&pr(7)).await.unwrap();
    assert_eq!(files, vec![pr_reviewer::ChangedFile { path: "a.py".into() }]);
}

#[tokio::test]
async fn duplicate_paths_are_not_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(files_page(&["a.py", "a.py"]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = review_cfg(&server.uri(), dir.path());
    let files = github_client(&cfg).get_changed_files(&pr(7)).await.unwrap();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn unauthorized_maps_to_a_distinct_non_transient_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = review_cfg(&server.uri(), dir.path());
    let err = github_client(&cfg)
        .get_changed_files(&pr(7))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Provider(ProviderError::Unauthorized)));
    assert!(!err.is_transient());
}
