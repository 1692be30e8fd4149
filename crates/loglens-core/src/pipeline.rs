//! The two run flows: analyze only, and analyze then comment.
//!
//! Each run is linear: read the log, analyze it once, optionally post one
//! comment, write the output. Analysis failures abort the run; comment
//! failures are downgraded to a warning and reported in [`RunReport`].

use std::path::Path;

use chrono::Utc;

use crate::config::AnalyzerConfig;
use crate::domain::{AnalysisResult, CommentTarget, FileError, LogContent, PipelineError};
use crate::gemini::LogAnalysisClient;
use crate::github::CommentPublisher;
use crate::obs::{self, Stage};
use crate::output::{self, OutputFormat, OutputTarget};
use crate::prompt::render_comment_body;

/// What happened to the pull request comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    Posted,
    Failed(String),
}

impl CommentOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(self, CommentOutcome::Posted)
    }
}

/// Outcome of a successful analyze-and-comment run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub analysis: AnalysisResult,
    pub comment: CommentOutcome,
}

/// Read a log file in one scoped call, decoding lossily.
pub async fn read_log(path: &Path) -> Result<LogContent, FileError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FileError::read(path, e))?;
    let log = LogContent::from_bytes(path, &bytes);
    obs::emit_log_read(&path.display().to_string(), log.char_count());
    Ok(log)
}

/// Entry point A: analyze a log file and write the result.
pub async fn run_analyze(
    config: &AnalyzerConfig,
    log_path: &Path,
    output: &OutputTarget,
    format: OutputFormat,
) -> Result<AnalysisResult, PipelineError> {
    obs::emit_stage(Stage::Start);
    let analysis = read_and_analyze(config, log_path).await?;

    obs::emit_stage(Stage::WriteOutput);
    let rendered = output::render(&analysis, format, Utc::now());
    output::write_output(output, &rendered).await?;

    obs::emit_stage(Stage::Done);
    Ok(analysis)
}

/// Entry point B: analyze a log file, comment on a pull request, write the
/// result.
///
/// The output is written whether or not the comment was posted.
pub async fn run_analyze_and_comment(
    config: &AnalyzerConfig,
    log_path: &Path,
    target: &CommentTarget,
    output: &OutputTarget,
    format: OutputFormat,
) -> Result<RunReport, PipelineError> {
    obs::emit_stage(Stage::Start);
    let analysis = read_and_analyze(config, log_path).await?;

    obs::emit_stage(Stage::PostComment);
    let comment = publish(config, target, &analysis).await;
    match &comment {
        CommentOutcome::Posted => {
            obs::emit_stage(Stage::CommentOk);
            obs::emit_comment_posted(&target.to_string());
        }
        CommentOutcome::Failed(reason) => {
            obs::emit_stage(Stage::CommentFailed);
            obs::emit_comment_failed(&target.to_string(), reason);
        }
    }

    obs::emit_stage(Stage::WriteOutput);
    let rendered = output::render(&analysis, format, Utc::now());
    output::write_output(output, &rendered).await?;

    obs::emit_stage(Stage::Done);
    Ok(RunReport { analysis, comment })
}

async fn read_and_analyze(
    config: &AnalyzerConfig,
    log_path: &Path,
) -> Result<AnalysisResult, PipelineError> {
    obs::emit_stage(Stage::ReadLog);
    let log = read_log(log_path).await?;

    obs::emit_stage(Stage::Analyze);
    let client = LogAnalysisClient::new(config)?;
    match client.analyze(&log).await {
        Ok(analysis) => {
            obs::emit_stage(Stage::AnalyzeOk);
            Ok(analysis)
        }
        Err(e) => {
            obs::emit_stage(Stage::AnalyzeFailed);
            Err(e.into())
        }
    }
}

async fn publish(
    config: &AnalyzerConfig,
    target: &CommentTarget,
    analysis: &AnalysisResult,
) -> CommentOutcome {
    let body = render_comment_body(&analysis.text, &analysis.model, Utc::now());
    let result = match CommentPublisher::new(config) {
        Ok(publisher) => publisher.post_comment(target, &body).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => CommentOutcome::Posted,
        Err(e) => CommentOutcome::Failed(e.to_string()),
    }
}
