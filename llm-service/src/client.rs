//! Chat-completions client (OpenAI-style REST).
//!
//! Minimal, non-streaming client around
//! `POST {endpoint}/v1/chat/completions`.
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-empty
//! - `cfg.model` must be non-empty
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized through [`crate::errors::LlmError`].

use std::time::{Duration, Instant};

use reqwest::{StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::CompletionConfig;
use crate::errors::{ConfigError, LlmError, Result, make_snippet};

/// Thin client for the completion API.
///
/// Constructed once from a complete [`CompletionConfig`] and passed by
/// reference to whatever drives it. Internally keeps a preconfigured
/// `reqwest::Client` with default headers and a bounded timeout.
#[derive(Debug)]
pub struct CompletionClient {
    client: reqwest::Client,
    cfg: CompletionConfig,
    url_chat: String,
}

impl CompletionClient {
    /// Creates a new [`CompletionClient`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if the API key is empty
    /// - [`ConfigError::EmptyModel`] if the model is empty
    /// - [`ConfigError::InvalidEndpoint`] if the endpoint scheme is not http(s)
    /// - [`LlmError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: CompletionConfig) -> Result<Self> {
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("OPENAI_API_KEY").into());
        }
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|e| LlmError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'));

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            "CompletionClient initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Configured model identifier.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Performs a single-turn, non-streaming chat completion.
    ///
    /// Sends exactly one system + user message pair. Returns `Ok(None)` when
    /// the response carries no usable content (no choices, or a message whose
    /// text is missing or whitespace-only) — the caller decides what an empty
    /// completion means.
    ///
    /// # Errors
    /// - [`LlmError::Quota`] for HTTP 429
    /// - [`LlmError::HttpStatus`] for other non-2xx responses
    /// - [`LlmError::Transport`] for client/network failures
    /// - [`LlmError::Decode`] if the JSON cannot be parsed
    pub async fn complete(&self, system: &str, user: &str) -> Result<Option<String>> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, system, user);

        debug!(
            model = %self.cfg.model,
            user_len = user.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis() as u64,
                "chat completion returned non-success status"
            );

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(LlmError::Quota { url, snippet });
            }
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            LlmError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|s| !s.trim().is_empty());

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis() as u64,
            empty = content.is_none(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads (subset of fields we actually use)
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds the fixed two-message exchange: system instruction + user prompt.
    fn from_cfg(cfg: &'a CompletionConfig, system: &'a str, user: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str) -> CompletionConfig {
        CompletionConfig {
            model: "gpt-4".into(),
            endpoint: endpoint.into(),
            api_key: "sk-test".into(),
            max_tokens: None,
            temperature: 0.0,
            timeout_secs: 5,
        }
    }

    #[test]
    fn rejects_bad_endpoint_scheme() {
        assert!(CompletionClient::new(cfg("ftp://api.example.com")).is_err());
        assert!(CompletionClient::new(cfg("")).is_err());
    }

    #[test]
    fn rejects_empty_key_and_model() {
        let mut c = cfg("https://api.openai.com");
        c.api_key = "  ".into();
        assert!(CompletionClient::new(c).is_err());

        let mut c = cfg("https://api.openai.com");
        c.model = String::new();
        assert!(CompletionClient::new(c).is_err());
    }

    #[test]
    fn chat_url_strips_trailing_slash() {
        let client = CompletionClient::new(cfg("https://api.openai.com/")).unwrap();
        assert_eq!(client.url_chat, "https://api.openai.com/v1/chat/completions");
    }
}
