//! Prompt template for build failure analysis and GitHub comment framing.

use chrono::{DateTime, Utc};

use crate::domain::LogContent;

/// Marker placed before a log whose head was dropped to fit the budget.
pub const TRUNCATION_MARKER: &str = "...[earlier output truncated]...";

/// Prompt sent to the AI endpoint for one log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    text: String,
    truncated: bool,
}

impl AnalysisPrompt {
    /// Build the prompt around the full log text.
    ///
    /// With a `max_log_chars` budget, longer logs keep only their tail.
    pub fn build(log: &LogContent, max_log_chars: Option<usize>) -> Self {
        let budget = max_log_chars.filter(|max| log.char_count() > *max);
        let truncated = budget.is_some();
        let excerpt = match budget {
            Some(max) => format!("{TRUNCATION_MARKER}\n\n{}", log.tail(max)),
            None => log.text().to_string(),
        };

        Self {
            text: render(&excerpt),
            truncated,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the head of the log was dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

fn render(log_excerpt: &str) -> String {
    format!(
        r#"You are an expert DevOps engineer analyzing a Jenkins CI/CD build failure log.

Analyze this build log and provide:

## 🔍 Root Cause
Identify the PRIMARY reason for the build failure. Be specific and concise (2-3 sentences).

## 📍 Error Location
Point to the exact file, line number, command, or stage where the failure occurred.
Quote the key error lines from the log.

## 🔧 Recommended Fixes
Provide 3-5 ACTIONABLE steps to resolve this issue:
1. [First concrete step with specific commands if applicable]
2. [Second step]
3. [Third step]

## 💡 Prevention Tips
Suggest 2-3 practices that prevent this issue in the future.

## 🔗 Additional Resources
If applicable, mention relevant documentation.

Build Log to Analyze:
---
{log_excerpt}
---

Format your response in clean Markdown suitable for a GitHub comment.
Be technical but clear and focus on actionable insights.
"#
    )
}

/// Frame an analysis for posting as a pull request comment.
pub fn render_comment_body(analysis: &str, model: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "## 🤖 AI Build Failure Analysis\n\n{analysis}\n\n---\n<sub>🔬 Analysis by **{model}** | 🤖 Generated by **loglens**</sub>\n<sub>⏰ {}</sub>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_full_log_within_budget() {
        let log = LogContent::new("ERROR: build failed\nexit code 2");
        let prompt = AnalysisPrompt::build(&log, Some(1000));

        assert!(!prompt.truncated());
        assert!(prompt.as_str().contains("ERROR: build failed\nexit code 2"));
        assert!(prompt.as_str().contains("Root Cause"));
        assert!(prompt.as_str().contains("Recommended Fixes"));
        assert!(!prompt.as_str().contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_prompt_keeps_tail_of_long_log() {
        let log = LogContent::new(format!("{}FATAL: linker failed", "x".repeat(500)));
        let prompt = AnalysisPrompt::build(&log, Some(20));

        assert!(prompt.truncated());
        assert!(prompt.as_str().contains(TRUNCATION_MARKER));
        assert!(prompt.as_str().contains("FATAL: linker failed"));
        assert!(!prompt.as_str().contains(&"x".repeat(10)));
    }

    #[test]
    fn test_prompt_without_budget_embeds_long_log_whole() {
        let text = format!("HEAD-MARKER\n{}", "x".repeat(30_000));
        let log = LogContent::new(text.as_str());
        let prompt = AnalysisPrompt::build(&log, None);

        assert!(!prompt.truncated());
        assert!(prompt.as_str().contains(&text));
        assert!(!prompt.as_str().contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let log = LogContent::new("npm ERR! missing script: build");
        assert_eq!(
            AnalysisPrompt::build(&log, Some(100)),
            AnalysisPrompt::build(&log, Some(100))
        );
    }

    #[test]
    fn test_comment_body_wraps_analysis() {
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .expect("parse RFC3339")
            .with_timezone(&Utc);
        let body = render_comment_body("Root cause: missing dep", "gemini-2.0-flash", at);

        assert!(body.starts_with("## 🤖 AI Build Failure Analysis"));
        assert!(body.contains("Root cause: missing dep"));
        assert!(body.contains("gemini-2.0-flash"));
        assert!(body.contains("2026-01-02 03:04:05 UTC"));
    }
}
