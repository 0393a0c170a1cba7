//! Thin completion-API service used by the review pipeline.
//!
//! One provider (OpenAI-style chat completions), one operation
//! ([`CompletionClient::complete`]), configured strictly from environment
//! variables and normalized into a single error type with transient
//! classification for the caller's retry policy.

pub mod client;
pub mod config;
pub mod errors;

pub use client::CompletionClient;
pub use config::CompletionConfig;
pub use errors::{ConfigError, LlmError};
