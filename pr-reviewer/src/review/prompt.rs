//! Prompt builders for the feedback generator.
//!
//! One fixed system instruction per style (reviewer persona + output format)
//! and a per-file user prompt embedding the filename and the full file
//! content verbatim in a fenced block. Keep prompts compact.

/// Prompt policy. Selectable via `PR_REVIEW_PROMPT_STYLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// `### filename` section with `Issue:` / `Fix:` dash bullets (default).
    #[default]
    IssueFix,
    /// Terse corrections-only list, no prose.
    Corrections,
    /// Naming-convention check only.
    Naming,
}

impl PromptStyle {
    /// Parses a `PR_REVIEW_PROMPT_STYLE` value; `None` for unknown input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "issue-fix" | "issue_fix" => Some(Self::IssueFix),
            "corrections" => Some(Self::Corrections),
            "naming" => Some(Self::Naming),
            _ => None,
        }
    }
}

/// Fixed reviewer-persona instruction for the system role.
pub fn system_prompt(style: PromptStyle) -> &'static str {
    match style {
        PromptStyle::IssueFix => {
            "You are a senior software engineer. For each file, return a section \
             starting with '### filename', then bullet-list issues and fixes. Each \
             item must use 'Issue: <description>' and 'Fix: <suggestion>' with dash \
             '-' bullets. If there are no issues, list 'No issues found.' under the \
             header."
        }
        PromptStyle::Corrections => {
            "You are a code reviewer. Return only necessary corrections as a terse \
             dash '-' bullet list, one item per line, no prose, no praise. If \
             nothing needs correction, output exactly: No issues found."
        }
        PromptStyle::Naming => {
            "You are a code reviewer checking naming conventions only. Flag \
             identifiers that violate the language's standard naming style and \
             suggest the corrected name for each. If all names conform, output \
             exactly: No issues found."
        }
    }
}

/// Per-file user prompt. The filename and the full content are embedded
/// verbatim; the content goes into a fenced block for model grounding.
pub fn user_prompt(style: PromptStyle, filename: &str, content: &str) -> String {
    let mut s = String::new();
    match style {
        PromptStyle::IssueFix => {
            s.push_str(&format!("Review the file `{}`.\n", filename));
            s.push_str("For each problem, output:\n");
            s.push_str("- Issue: <brief description>\n");
            s.push_str("  Fix: <precise fix>\n");
            s.push_str("Use dash '-' for bullets.\n");
            s.push_str("If there are no issues, output exactly:\nNo issues found.\n");
        }
        PromptStyle::Corrections => {
            s.push_str(&format!(
                "List the necessary corrections for the file `{}`.\n",
                filename
            ));
        }
        PromptStyle::Naming => {
            s.push_str(&format!(
                "Check naming conventions in the file `{}`.\n",
                filename
            ));
        }
    }
    s.push_str("```\n");
    s.push_str(content);
    s.push_str("\n```\n");
    s
}
