//! Comment-publisher behavior against a local fake of the hosting API.

mod common;

use common::*;
use pr_reviewer::publish::{CommentPublisher, PublishConfig, comment_marker};
use pr_reviewer::run_review;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILES_PATH: &str = "/repos/octo/demo/pulls/42/files";
const COMMENTS_PATH: &str = "/repos/octo/demo/issues/42/comments";
const CHAT_PATH: &str = "/v1/chat/completions";

#[tokio::test]
async fn dry_run_performs_no_network_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let publ = CommentPublisher::new(
        server.uri(),
        "ghp_test",
        PublishConfig {
            dry_run: true,
            skip_duplicates: true,
        },
    )
    .unwrap();

    let res = publ
        .publish(&pr(42), "a.py", "### a.py\n\nNo issues found.")
        .await
        .unwrap();
    assert!(!res.performed);
    assert_eq!(res.skipped_reason.as_deref(), Some("dry-run"));
}

#[tokio::test]
async fn scan_collects_marker_keys_across_pages() {
    // Page 1 is full (100 comments, one carries a marker), page 2 is short.
    let mut page1: Vec<serde_json::Value> = (0..99)
        .map(|i| json!({ "id": i, "body": "just chatter" }))
        .collect();
    page1.push(json!({
        "id": 99,
        "body": format!("### a.py\n\nold\n\n{}", comment_marker("a.py", "aaaaaaaaaaaa"))
    }));
    let page2 = vec![json!({
        "id": 100,
        "body": format!("### b.py\n\nold\n\n{}", comment_marker("b.py", "bbbbbbbbbbbb"))
    })];

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(wiremock::matchers::query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(page1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(page2)))
        .expect(1)
        .mount(&server)
        .await;

    let publ = CommentPublisher::new(server.uri(), "ghp_test", PublishConfig::default()).unwrap();
    let keys = publ.load_existing_keys(&pr(42)).await.unwrap();

    assert_eq!(keys.len(), 2);
    assert!(keys.contains("a.py#aaaaaaaaaaaa"));
    assert!(keys.contains("b.py#bbbbbbbbbbbb"));
}

#[tokio::test]
async fn failing_scan_degrades_to_posting_without_duplicate_skip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(files_page(&["a.py"]))
        .mount(&server)
        .await;
    // Scan blows up; the run must still review and post.
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(chat_completion("No issues found."))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 20 })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.py"), "print(1)").unwrap();
    let cfg = review_cfg(&server.uri(), dir.path());

    let summary = run_review(
        &github_client(&cfg),
        &publisher(&cfg),
        &completion_client(&server.uri()),
        &cfg,
        &pr(42),
    )
    .await
    .unwrap();

    assert_eq!(summary.posted, 1);
    assert_eq!(summary.failed, 0);
}
