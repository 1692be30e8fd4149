//! Domain models for loglens.
//!
//! Canonical definitions for the transient entities of a run:
//! - `LogContent`: build log text read from disk
//! - `AnalysisResult`: text produced by the AI endpoint
//! - `CommentTarget`: pull request a comment is posted to

pub mod analysis;
pub mod error;
pub mod log;
pub mod target;

pub use analysis::AnalysisResult;
pub use error::{AnalysisError, ConfigError, FileError, PipelineError, PublishError, Result};
pub use log::LogContent;
pub use target::CommentTarget;
