//! loglens core library
//!
//! Sends a CI build log to Gemini for failure analysis and optionally posts
//! the result as a GitHub pull request comment.

pub mod config;
pub mod domain;
pub mod gemini;
pub mod github;
pub mod obs;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod telemetry;

pub use config::AnalyzerConfig;
pub use domain::{
    AnalysisError, AnalysisResult, CommentTarget, ConfigError, FileError, LogContent,
    PipelineError, PublishError,
};
pub use gemini::LogAnalysisClient;
pub use github::CommentPublisher;
pub use obs::{new_run_id, RunSpan, Stage};
pub use output::{OutputFormat, OutputTarget};
pub use pipeline::{read_log, run_analyze, run_analyze_and_comment, CommentOutcome, RunReport};
pub use prompt::{render_comment_body, AnalysisPrompt};
pub use telemetry::init_tracing;

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = concat!("loglens/", env!("CARGO_PKG_VERSION"));
