//! Comment publisher.
//!
//! Formats per-file comment bodies and posts them to the provider's
//! issue-comment endpoint.
//!
//! - Success is strictly 201 Created; anything else is a per-file failure
//!   reported with the response body, never silently dropped.
//! - Idempotency: a hidden HTML marker embeds a deterministic per-file
//!   fingerprint; existing comments are scanned once per run and files whose
//!   key is already present are skipped.
//! - Dry-run: log the would-be comment without calling the API.

pub mod github;

pub use github::CommentPublisher;

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::types::PullRequestRef;

lazy_static! {
    /// Marker format: `<!-- pr-review:key=<path>;hash=<hex12>;ver=1 -->`
    static ref MARKER_RE: Regex =
        Regex::new(r"<!--\s*pr-review:key=([^;>]+);hash=([0-9a-f]+);ver=\d+\s*-->").unwrap();
}

/// Publishing knobs (driver-level).
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// If true, do not send anything; log what would be posted.
    pub dry_run: bool,
    /// If true, scan existing comments and skip files already covered.
    pub skip_duplicates: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            skip_duplicates: true,
        }
    }
}

/// Result for a single published comment.
#[derive(Debug, Clone)]
pub struct PublishedComment {
    /// Was a network POST performed (false in dry-run)?
    pub performed: bool,
    /// Provider id of the created comment, when reported.
    pub comment_id: Option<u64>,
    /// Reason if nothing was sent (dry-run).
    pub skipped_reason: Option<String>,
}

/// Deterministic per-file fingerprint: SHA-256 over repository, PR number,
/// path and content, truncated to 12 hex chars. Stable across re-runs with
/// unchanged content; changes whenever the file content changes.
pub fn content_fingerprint(pr: &PullRequestRef, path: &str, content: &str) -> String {
    let mut h = Sha256::new();
    h.update(pr.repo.as_bytes());
    h.update(b"#");
    h.update(pr.number.to_string().as_bytes());
    h.update(b":");
    h.update(path.as_bytes());
    h.update(b":");
    h.update(content.as_bytes());
    let digest = format!("{:x}", h.finalize());
    digest[..12].to_string()
}

/// Idempotency key as stored in the duplicate set: `<path>#<hash>`.
pub fn comment_key(path: &str, fingerprint: &str) -> String {
    format!("{}#{}", path, fingerprint)
}

/// Hidden marker appended to the comment body.
pub fn comment_marker(path: &str, fingerprint: &str) -> String {
    format!("<!-- pr-review:key={};hash={};ver=1 -->", path, fingerprint)
}

/// Extracts `<path>#<hash>` keys from an existing comment body.
pub fn extract_keys(body: &str) -> Vec<String> {
    MARKER_RE
        .captures_iter(body)
        .map(|caps| format!("{}#{}", &caps[1], &caps[2]))
        .collect()
}

/// Formats the full comment body: `### <filename>` header, feedback text,
/// trailing hidden marker.
pub fn format_comment_body(filename: &str, feedback: &str, marker: &str) -> String {
    format!("### {}\n\n{}\n\n{}", filename, feedback, marker)
}
