//! Structured observability hooks for the analysis pipeline.
//!
//! Every event carries an `event` field; pipeline transitions additionally
//! carry `stage`. Wrap a run in [`RunSpan`] so all events share its `run_id`.

use tracing::{info, warn};

/// RAII guard that enters a run-scoped tracing span.
///
/// ```ignore
/// let _span = RunSpan::enter(&run_id);
/// // every event below is tagged with run_id
/// ```
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    /// Create and enter a span tagged with the run_id.
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("loglens.run", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Fresh identifier for one process run.
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Pipeline states, in the order a run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ReadLog,
    Analyze,
    AnalyzeFailed,
    AnalyzeOk,
    PostComment,
    CommentFailed,
    CommentOk,
    WriteOutput,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::ReadLog => "read_log",
            Stage::Analyze => "analyze",
            Stage::AnalyzeFailed => "analyze_failed",
            Stage::AnalyzeOk => "analyze_ok",
            Stage::PostComment => "post_comment",
            Stage::CommentFailed => "comment_failed",
            Stage::CommentOk => "comment_ok",
            Stage::WriteOutput => "write_output",
            Stage::Done => "done",
        }
    }
}

/// Emit event: pipeline entered a stage.
pub fn emit_stage(stage: Stage) {
    info!(event = "pipeline.stage", stage = stage.as_str());
}

/// Emit event: log read from disk.
pub fn emit_log_read(path: &str, chars: usize) {
    info!(
        event = "log.read",
        path = %path,
        chars = chars,
        kib = %format!("{:.2}", chars as f64 / 1024.0),
    );
}

/// Emit event: analysis request about to be sent.
pub fn emit_analysis_started(model: &str, log_chars: usize, truncated: bool) {
    info!(
        event = "analysis.started",
        model = %model,
        log_chars = log_chars,
        truncated = truncated,
    );
}

/// Emit event: analysis text received.
pub fn emit_analysis_finished(model: &str, duration_ms: u64, result_chars: usize) {
    info!(
        event = "analysis.finished",
        model = %model,
        duration_ms = duration_ms,
        result_chars = result_chars,
    );
}

/// Emit event: comment posted to a pull request.
pub fn emit_comment_posted(target: &str) {
    info!(event = "comment.posted", pr = %target);
}

/// Emit event: comment posting failed (warning level, never fatal).
pub fn emit_comment_failed(target: &str, error: &dyn std::fmt::Display) {
    warn!(event = "comment.failed", pr = %target, error = %error, "failed to post analysis comment");
}
