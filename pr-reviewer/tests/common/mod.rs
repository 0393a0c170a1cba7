//! Shared fixtures for the integration suites: one wiremock server plays
//! both the hosting API and the completion API (distinct paths).

#![allow(dead_code)]

use std::path::Path;

use llm_service::{CompletionClient, CompletionConfig};
use pr_reviewer::config::ReviewConfig;
use pr_reviewer::github::GitHubClient;
use pr_reviewer::publish::{CommentPublisher, PublishConfig};
use pr_reviewer::retry::RetryConfig;
use pr_reviewer::review::prompt::PromptStyle;
use pr_reviewer::types::PullRequestRef;
use serde_json::json;
use wiremock::ResponseTemplate;

pub const REPO: &str = "octo/demo";

pub fn pr(number: u64) -> PullRequestRef {
    PullRequestRef {
        repo: REPO.into(),
        number,
    }
}

pub fn review_cfg(server_uri: &str, root: &Path) -> ReviewConfig {
    ReviewConfig {
        token: "ghp_test".into(),
        repository: REPO.into(),
        base_api: server_uri.trim_end_matches('/').to_string(),
        repo_root: root.to_path_buf(),
        dry_run: false,
        skip_duplicates: true,
        prompt_style: PromptStyle::IssueFix,
        retry: RetryConfig {
            max_retries: 1,
            base_delay_ms: 1,
        },
    }
}

pub fn github_client(cfg: &ReviewConfig) -> GitHubClient {
    GitHubClient::new(cfg.base_api.clone(), cfg.token.clone()).unwrap()
}

pub fn publisher(cfg: &ReviewConfig) -> CommentPublisher {
    CommentPublisher::new(
        cfg.base_api.clone(),
        &cfg.token,
        PublishConfig {
            dry_run: cfg.dry_run,
            skip_duplicates: cfg.skip_duplicates,
        },
    )
    .unwrap()
}

pub fn completion_client(server_uri: &str) -> CompletionClient {
    CompletionClient::new(CompletionConfig {
        model: "gpt-4".into(),
        endpoint: server_uri.to_string(),
        api_key: "sk-test".into(),
        max_tokens: None,
        temperature: 0.0,
        timeout_secs: 5,
    })
    .unwrap()
}

/// Files-endpoint page, provider order preserved.
pub fn files_page(files: &[&str]) -> ResponseTemplate {
    let entries: Vec<_> = files
        .iter()
        .map(|f| json!({ "filename": f, "status": "modified" }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!(entries))
}

/// Chat-completions response carrying `content`.
pub fn chat_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    }))
}
