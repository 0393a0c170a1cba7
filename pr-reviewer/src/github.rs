//! GitHub provider (REST) for pull-request change sets.
//!
//! Endpoints used:
//! - GET /repos/{owner}/{repo}/pulls/{number}/files
//!   (paginated; `filename` per entry, provider order preserved)

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::PrResult;
use crate::types::{ChangedFile, PullRequestRef};

/// Pinned REST API version header value.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Page size for paginated endpoints.
pub(crate) const PER_PAGE: usize = 100;

/// Thin fetch-side client: lists what a PR changed. Publishing goes through
/// [`crate::publish::CommentPublisher`] so each side stays a separate,
/// explicitly constructed dependency.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // e.g. "https://api.github.com"
    token: String,
}

impl GitHubClient {
    /// Constructs a client with bounded timeouts and a shared connection pool.
    pub fn new(base_api: impl Into<String>, token: impl Into<String>) -> PrResult<Self> {
        let http = Client::builder()
            .user_agent("pr-review-bot/0.1")
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_api: trim_base(base_api.into()),
            token: token.into(),
        })
    }

    /// Fetches the ordered list of files changed by the pull request.
    ///
    /// Pages through the files endpoint until a short page. Order is the
    /// provider's reported order; duplicates are not filtered. An empty list
    /// is a success (the PR has no changed files).
    ///
    /// Failure mapping follows the crate taxonomy: 404 → `NotFound`
    /// (repository or PR missing/inaccessible), 401/403 → auth, 429/5xx/
    /// timeout → transient.
    pub async fn get_changed_files(&self, pr: &PullRequestRef) -> PrResult<Vec<ChangedFile>> {
        let url = format!(
            "{}/repos/{}/pulls/{}/files",
            self.base_api, pr.repo, pr.number
        );

        let mut files = Vec::new();
        let mut page = 1usize;
        loop {
            debug!("fetch: GET {} page={}", url, page);
            let batch: Vec<GitHubPrFile> = self
                .http
                .get(&url)
                .query(&[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .header("Accept", "application/vnd.github+json")
                .header("Authorization", format!("Bearer {}", self.token))
                .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let n = batch.len();
            files.extend(batch.into_iter().map(|f| ChangedFile { path: f.filename }));
            if n < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(files)
    }
}

pub(crate) fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

/// --- GitHub response shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct GitHubPrFile {
    filename: String,
}
