//! Domain types shared across pipeline stages.

use serde::{Deserialize, Serialize};

/// A pull request inside the configured repository.
///
/// * `repo`   – hosting form `"owner/name"`.
/// * `number` – pull request number (positive).
///
/// Immutable, supplied once at invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub repo: String,
    pub number: u64,
}

/// One entry of the PR change set.
///
/// Order is the provider's reported order; the fetcher does not filter or
/// de-duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path.
    pub path: String,
}

/// File content, held only while feedback is generated for that file.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub path: String,
    pub text: String,
}
