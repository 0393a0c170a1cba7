//! Public entry for the PR review pipeline.
//!
//! Single high-level function to review a pull request end to end:
//!
//! 1) **Fetch** — list the PR's changed files. A fetch failure (after the
//!    bounded retry) aborts the run; an empty change set ends it cleanly.
//! 2) **Scan** — collect idempotency keys from existing comments
//!    (best-effort; a failing scan degrades to "no duplicates known").
//! 3) **Per file, in change-set order** — load local content (soft-skip when
//!    missing), skip files whose fingerprint already has a comment, generate
//!    feedback via the completion API, format and post the comment. A failure
//!    in any per-file stage is logged with the filename and the loop
//!    continues; the run never aborts for a single file.
//!
//! Execution is single-threaded and sequential over await points: one file at
//! a time, comments posted in change-set order. `tracing` carries one line
//! per file plus a final summary.

pub mod config;
pub mod content;
pub mod errors;
pub mod github;
pub mod publish;
pub mod retry;
pub mod review;
pub mod types;

use std::fmt;
use std::time::Instant;

use llm_service::CompletionClient;
use tracing::{debug, error, info, warn};

use config::ReviewConfig;
use errors::PrResult;
use github::GitHubClient;
use publish::{CommentPublisher, comment_key, comment_marker, content_fingerprint, format_comment_body};
use review::generate_feedback;
use types::PullRequestRef;

/// Per-run counters. The terminal state is reached whether zero, some, or
/// all files succeeded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Comments created (or would-be created in dry-run).
    pub posted: usize,
    /// Files skipped because they are missing locally.
    pub skipped: usize,
    /// Files skipped because an identical comment already exists.
    pub duplicates: usize,
    /// Files whose load/generate/publish stage failed.
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.posted + self.skipped + self.duplicates + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} posted, {} skipped, {} duplicates, {} failed",
            self.posted, self.skipped, self.duplicates, self.failed
        )
    }
}

/// Run the whole pipeline for one pull request.
///
/// Returns `Err` only when the run could not start (the initial fetch
/// failed); per-file failures are recorded in the summary, and the caller's
/// exit code should not depend on them.
pub async fn run_review(
    github: &GitHubClient,
    publisher: &CommentPublisher,
    llm: &CompletionClient,
    cfg: &ReviewConfig,
    pr: &PullRequestRef,
) -> PrResult<RunSummary> {
    let t0 = Instant::now();
    let mut summary = RunSummary::default();

    debug!("fetch: list changed files for {}#{}", pr.repo, pr.number);
    let files = retry::with_retry(cfg.retry, "fetch", || github.get_changed_files(pr)).await?;
    info!(
        "fetch: {} changed file(s) ({} ms)",
        files.len(),
        t0.elapsed().as_millis()
    );

    if files.is_empty() {
        info!("no changed files to review");
        return Ok(summary);
    }

    let existing = if publisher.config().skip_duplicates {
        match publisher.load_existing_keys(pr).await {
            Ok(keys) => {
                debug!("scan: {} existing marker key(s)", keys.len());
                keys
            }
            Err(e) => {
                warn!(
                    "scan: could not list existing comments, duplicate skip disabled for this run: {}",
                    e
                );
                Default::default()
            }
        }
    } else {
        Default::default()
    };

    for file in &files {
        let path = file.path.as_str();
        let t_file = Instant::now();

        let content = match content::load_content(&cfg.repo_root, path).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                // warn already logged by the loader
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                error!("load failed for {}: {}", path, e);
                summary.failed += 1;
                continue;
            }
        };

        let fingerprint = content_fingerprint(pr, path, &content.text);
        if existing.contains(&comment_key(path, &fingerprint)) {
            info!("skip {}: identical comment already posted", path);
            summary.duplicates += 1;
            continue;
        }

        info!("reviewing {}...", path);
        let feedback = match retry::with_retry(cfg.retry, "generate", || {
            generate_feedback(llm, cfg.prompt_style, path, &content.text)
        })
        .await
        {
            Ok(f) => f,
            Err(e) => {
                error!("feedback generation failed for {}: {}", path, e);
                summary.failed += 1;
                continue;
            }
        };

        let body = format_comment_body(path, &feedback, &comment_marker(path, &fingerprint));
        match retry::with_retry(cfg.retry, "publish", || publisher.publish(pr, path, &body)).await {
            Ok(res) => {
                if res.performed {
                    info!("commented on {} ({} ms)", path, t_file.elapsed().as_millis());
                }
                summary.posted += 1;
            }
            Err(e) => {
                error!("comment failed for {}: {}", path, e);
                summary.failed += 1;
            }
        }
    }

    info!("review done: {} in {} ms", summary, t0.elapsed().as_millis());
    Ok(summary)
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use config::ReviewConfig as PipelineConfig;
pub use publish::{PublishConfig, PublishedComment};
pub use review::NO_FEEDBACK_PLACEHOLDER;
pub use types::{ChangedFile, FileContent};
