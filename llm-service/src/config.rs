//! Completion-API config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`   = API key (mandatory)
//! - `OPENAI_MODEL`     = model identifier (optional, default `gpt-4`)
//! - `OPENAI_BASE_URL`  = API base (optional, default `https://api.openai.com`)
//! - `LLM_MAX_TOKENS`   = optional max completion tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (default 60)
//!
//! Temperature is pinned to `0.0` and not configurable: feedback for
//! identical file content must be reproducible across runs.

use crate::errors::{Result, env_opt_u32, env_opt_u64, must_env};

/// Default model, matching the hosted completion API's review-capable tier.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default API base for the hosted completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for a completion-API invocation.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Model identifier string (e.g. `"gpt-4"`).
    pub model: String,

    /// API base URL (scheme + host, optionally a path prefix).
    pub endpoint: String,

    /// API key used as a bearer token.
    pub api_key: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature. Pinned to 0.0 by [`CompletionConfig::from_env`].
    pub temperature: f32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// Reads the completion config from the environment.
    ///
    /// # Errors
    /// [`crate::ConfigError::MissingVar`] if `OPENAI_API_KEY` is absent or
    /// empty; [`crate::ConfigError::InvalidNumber`] for malformed numeric
    /// values.
    pub fn from_env() -> Result<Self> {
        let api_key = must_env("OPENAI_API_KEY")?;
        let model = env_or("OPENAI_MODEL", DEFAULT_MODEL);
        let endpoint = env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL);
        let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            model,
            endpoint,
            api_key,
            max_tokens,
            temperature: 0.0,
            timeout_secs,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
