//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Provider-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - Transient classification feeding the bounded-retry policy.
//! - Ergonomic `?` via `From` impls, no dynamic dispatch.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PrResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Hosting-provider (GitHub REST) related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration problems (missing tokens, malformed repository, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Comment-creation failure (non-201 from the issue-comment endpoint).
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Completion-API failure while generating feedback.
    #[error(transparent)]
    Llm(#[from] llm_service::LlmError),

    /// Local file I/O failure in the content loader (missing files are a
    /// soft-skip, not an error; this covers the rest).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input validation errors (bad headers, malformed responses, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// True for failures worth a bounded retry: timeouts, connect/network
    /// errors, 429 and 5xx from either remote API. Everything else —
    /// auth, not-found, validation, non-201 publishes — surfaces immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Provider(p) => matches!(
                p,
                ProviderError::Timeout
                    | ProviderError::Network(_)
                    | ProviderError::RateLimited { .. }
                    | ProviderError::Server(_)
            ),
            Error::Llm(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// Detailed provider-specific error used inside the provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404): repository or pull request missing/inaccessible.
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// Repository identifier did not look like `owner/name`.
    #[error("GITHUB_REPOSITORY must look like owner/name, got: {0}")]
    InvalidRepository(String),

    /// A number failed to parse (retry knobs).
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },
}

/// Comment-publishing errors, kept distinct from transport failures so the
/// operator can tell a rejected comment from a network problem.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Comment creation returned something other than 201 Created. The
    /// response body is carried verbatim for diagnosis.
    #[error("comment creation failed: status={status} body={body}")]
    UnexpectedStatus { status: u16, body: String },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => ProviderError::Unauthorized,
                403 => ProviderError::Forbidden,
                404 => ProviderError::NotFound,
                429 => ProviderError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => ProviderError::Server(code),
                _ => ProviderError::HttpStatus(code),
            };
        }
        ProviderError::Network(e.to_string())
    }
}
