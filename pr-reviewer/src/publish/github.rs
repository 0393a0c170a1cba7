//! GitHub publisher.
//!
//! API:
//! - POST /repos/{owner}/{repo}/issues/{number}/comments   (create)
//! - GET  /repos/{owner}/{repo}/issues/{number}/comments   (duplicate scan)
//!
//! A pull request's conversation thread is its issue thread, so comment
//! creation goes through the issues endpoint. At most one delivery attempt
//! per call; the driver owns the retry policy.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use crate::errors::{Error, PrResult, PublishError};
use crate::github::{GITHUB_API_VERSION, PER_PAGE, trim_base};
use crate::publish::{PublishConfig, PublishedComment, extract_keys};
use crate::types::PullRequestRef;

/// Publish-side client, constructed once and passed to the driver.
#[derive(Debug, Clone)]
pub struct CommentPublisher {
    http: reqwest::Client,
    base_api: String,
    headers: HeaderMap,
    cfg: PublishConfig,
}

impl CommentPublisher {
    pub fn new(base_api: impl Into<String>, token: &str, cfg: PublishConfig) -> PrResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        let headers = build_github_headers(token)?;
        Ok(Self {
            http,
            base_api: trim_base(base_api.into()),
            headers,
            cfg,
        })
    }

    pub fn config(&self) -> &PublishConfig {
        &self.cfg
    }

    /// Posts one comment. Success is strictly 201 Created; any other status
    /// is a hard failure for that file, carried with the response body.
    pub async fn publish(
        &self,
        pr: &PullRequestRef,
        filename: &str,
        body: &str,
    ) -> PrResult<PublishedComment> {
        if self.cfg.dry_run {
            info!(
                "publish: dry-run, would comment on {} (pr #{}):\n{}",
                filename, pr.number, body
            );
            return Ok(PublishedComment {
                performed: false,
                comment_id: None,
                skipped_reason: Some("dry-run".into()),
            });
        }

        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_api, pr.repo, pr.number
        );

        #[derive(serde::Serialize)]
        struct Req<'a> {
            body: &'a str,
        }

        debug!("publish: POST {} file={}", url, filename);
        let resp = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(&Req { body })
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            let text = resp.text().await.unwrap_or_default();
            return Err(PublishError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        #[derive(serde::Deserialize)]
        struct CommentResp {
            id: u64,
        }
        let created: Option<CommentResp> = resp.json().await.ok();

        Ok(PublishedComment {
            performed: true,
            comment_id: created.map(|c| c.id),
            skipped_reason: None,
        })
    }

    /// Scans existing issue comments and collects idempotency keys from
    /// embedded markers. Paginates like the fetch side.
    pub async fn load_existing_keys(&self, pr: &PullRequestRef) -> PrResult<HashSet<String>> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_api, pr.repo, pr.number
        );

        #[derive(serde::Deserialize)]
        struct Comment {
            #[serde(default)]
            body: Option<String>,
        }

        let mut keys = HashSet::new();
        let mut page = 1usize;
        loop {
            debug!("scan: GET {} page={}", url, page);
            let resp = self
                .http
                .get(&url)
                .query(&[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .headers(self.headers.clone())
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(Error::Validation(format!(
                    "list comments failed: status={} body={:?}",
                    resp.status(),
                    resp.text().await.ok()
                )));
            }

            let batch: Vec<Comment> = resp.json().await?;
            let n = batch.len();
            for c in batch {
                if let Some(b) = c.body {
                    for k in extract_keys(&b) {
                        keys.insert(k);
                    }
                }
            }
            if n < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(keys)
    }
}

fn build_github_headers(token: &str) -> PrResult<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static("pr-review-bot/0.1"));
    h.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    h.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Validation(format!("bad token: {e}")))?,
    );
    Ok(h)
}
