//! Feedback generation: prompt pair → single-turn completion → non-empty text.
//!
//! One message exchange per file, deterministic sampling (temperature pinned
//! by the completion config). No retry here — the driver owns the retry
//! policy. An empty model reply becomes [`NO_FEEDBACK_PLACEHOLDER`] so a
//! processed file never yields an empty comment body.

pub mod prompt;

use std::time::Instant;

use llm_service::CompletionClient;
use tracing::debug;

use crate::errors::PrResult;
use prompt::{PromptStyle, system_prompt, user_prompt};

/// Posted instead of an empty model reply.
pub const NO_FEEDBACK_PLACEHOLDER: &str = "No issues found.";

/// Asks the completion API to review one file.
///
/// Completion-API errors propagate to the caller as that file's failure;
/// they never abort the run.
pub async fn generate_feedback(
    llm: &CompletionClient,
    style: PromptStyle,
    filename: &str,
    content: &str,
) -> PrResult<String> {
    let t0 = Instant::now();
    let system = system_prompt(style);
    let user = user_prompt(style, filename, content);
    debug!(
        "generate: file={} style={:?} prompt_len={}",
        filename,
        style,
        user.len()
    );

    let reply = llm.complete(system, &user).await?;

    let feedback = match reply {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => {
            debug!(
                "generate: empty completion for {}, using placeholder",
                filename
            );
            NO_FEEDBACK_PLACEHOLDER.to_string()
        }
    };

    debug!(
        "generate: file={} feedback_len={} ({} ms)",
        filename,
        feedback.len(),
        t0.elapsed().as_millis()
    );
    Ok(feedback)
}
