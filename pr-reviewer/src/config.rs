//! Pipeline configuration loaded strictly from environment variables.
//!
//! Required:
//! - `GIT_TOKEN`         = hosting-API access token
//! - `GITHUB_REPOSITORY` = repository identifier, `owner/name`
//!
//! Optional (with defaults):
//! - `GITHUB_API_URL`            = API base (default `https://api.github.com`)
//! - `REVIEW_REPO_ROOT`          = local checkout root (default `.`)
//! - `PR_REVIEW_DRY_RUN`         = log instead of POST (default false)
//! - `PR_REVIEW_SKIP_DUPLICATES` = fingerprint duplicate skip (default true)
//! - `PR_REVIEW_PROMPT_STYLE`    = `issue-fix` | `corrections` | `naming`
//! - `PR_REVIEW_RETRY_ATTEMPTS`  = retries for transient failures (default 2)
//! - `PR_REVIEW_RETRY_BASE_MS`   = initial backoff in ms (default 500)
//!
//! Missing or empty required values fail fast, before any network call. The
//! result is read once at startup and treated as read-only for the run.

use std::path::PathBuf;

use tracing::warn;

use crate::errors::{ConfigError, PrResult};
use crate::retry::RetryConfig;
use crate::review::prompt::PromptStyle;

/// Default hosting-API base.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Hosting-API access token (bearer).
    pub token: String,
    /// Repository identifier, `owner/name`.
    pub repository: String,
    /// Hosting-API base URL.
    pub base_api: String,
    /// Root of the local checkout; changed-file paths resolve against it.
    pub repo_root: PathBuf,
    /// Log would-be comments instead of posting.
    pub dry_run: bool,
    /// Scan existing comments and skip files already covered.
    pub skip_duplicates: bool,
    /// Prompt policy for the feedback generator.
    pub prompt_style: PromptStyle,
    /// Bounded-retry knobs for the network stages.
    pub retry: RetryConfig,
}

impl ReviewConfig {
    /// Reads the full pipeline configuration from the environment.
    pub fn from_env() -> PrResult<Self> {
        let token = must_env("GIT_TOKEN")?;
        let repository = must_env("GITHUB_REPOSITORY")?;
        validate_repository(&repository)?;

        let base_api = env_or("GITHUB_API_URL", DEFAULT_GITHUB_API);
        let repo_root = PathBuf::from(env_or("REVIEW_REPO_ROOT", "."));
        let dry_run = env_bool("PR_REVIEW_DRY_RUN", false);
        let skip_duplicates = env_bool("PR_REVIEW_SKIP_DUPLICATES", true);

        let prompt_style = match std::env::var("PR_REVIEW_PROMPT_STYLE") {
            Ok(v) if !v.trim().is_empty() => PromptStyle::parse(&v).unwrap_or_else(|| {
                warn!("unknown PR_REVIEW_PROMPT_STYLE {:?}, using issue-fix", v);
                PromptStyle::default()
            }),
            _ => PromptStyle::default(),
        };

        let defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_retries: env_usize("PR_REVIEW_RETRY_ATTEMPTS", defaults.max_retries)?,
            base_delay_ms: env_u64("PR_REVIEW_RETRY_BASE_MS", defaults.base_delay_ms)?,
        };

        Ok(Self {
            token,
            repository,
            base_api,
            repo_root,
            dry_run,
            skip_duplicates,
            prompt_style,
            retry,
        })
    }
}

/// Checks the `owner/name` shape: exactly one slash, both sides non-empty.
pub(crate) fn validate_repository(s: &str) -> Result<(), ConfigError> {
    let mut parts = s.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidRepository(s.to_string())),
    }
}

/// Fetches a required, non-empty environment variable.
fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn env_usize(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.parse().map_err(|_| ConfigError::InvalidNumber {
            var: key,
            reason: "expected usize",
        }),
        _ => Ok(default),
    }
}

fn env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.parse().map_err(|_| ConfigError::InvalidNumber {
            var: key,
            reason: "expected u64",
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes env mutation across this module's tests.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn repository_shape() {
        assert!(validate_repository("octo/demo").is_ok());
        assert!(validate_repository("octo").is_err());
        assert!(validate_repository("/demo").is_err());
        assert!(validate_repository("octo/").is_err());
        assert!(validate_repository("a/b/c").is_err());
        assert!(validate_repository("").is_err());
    }

    #[test]
    fn bool_parsing() {
        assert!(env_bool("PR_REVIEW_TEST_UNSET_BOOL", true));
        assert!(!env_bool("PR_REVIEW_TEST_UNSET_BOOL", false));
    }

    #[test]
    fn from_env_reads_required_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("GIT_TOKEN", "ghp_test");
            std::env::set_var("GITHUB_REPOSITORY", "octo/demo");
            std::env::remove_var("GITHUB_API_URL");
            std::env::remove_var("REVIEW_REPO_ROOT");
            std::env::remove_var("PR_REVIEW_DRY_RUN");
            std::env::remove_var("PR_REVIEW_SKIP_DUPLICATES");
            std::env::remove_var("PR_REVIEW_PROMPT_STYLE");
            std::env::remove_var("PR_REVIEW_RETRY_ATTEMPTS");
            std::env::remove_var("PR_REVIEW_RETRY_BASE_MS");
        }

        let cfg = ReviewConfig::from_env().unwrap();
        assert_eq!(cfg.base_api, DEFAULT_GITHUB_API);
        assert_eq!(cfg.repo_root, PathBuf::from("."));
        assert!(!cfg.dry_run);
        assert!(cfg.skip_duplicates);
        assert_eq!(cfg.prompt_style, PromptStyle::IssueFix);
        assert_eq!(cfg.retry, RetryConfig::default());
    }

    #[test]
    fn from_env_fails_fast_without_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("GIT_TOKEN");
            std::env::set_var("GITHUB_REPOSITORY", "octo/demo");
        }
        assert!(ReviewConfig::from_env().is_err());
    }
}
