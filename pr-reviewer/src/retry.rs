//! Bounded retry with exponential backoff for transient failures.
//!
//! Wraps the three network stages (fetch, generate, publish). Only failures
//! classified transient by [`Error::is_transient`] are retried — timeouts,
//! connect errors, 429 and 5xx; everything else surfaces immediately.

use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

use crate::errors::{Error, PrResult};

/// Retry knobs. `max_retries = 0` disables retrying entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Additional attempts after the first failure.
    pub max_retries: usize,
    /// Initial backoff delay in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
        }
    }
}

/// Runs `op`, retrying transient failures up to the configured bound.
///
/// `stage` labels the operation in debug logs.
pub async fn with_retry<F, Fut, T>(cfg: RetryConfig, stage: &'static str, op: F) -> PrResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PrResult<T>>,
{
    let strategy = ExponentialBackoff::from_millis(cfg.base_delay_ms)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(cfg.max_retries);

    RetryIf::spawn(strategy, op, |err: &Error| {
        let transient = err.is_transient();
        if transient {
            debug!("{}: transient failure, retrying: {}", stage, err);
        }
        transient
    })
    .await
}
