//! Error taxonomy for log analysis and comment publishing.

use std::path::PathBuf;

/// Errors produced while asking the AI endpoint to analyze a log.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing credential: {var} is not set")]
    MissingCredential { var: &'static str },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("AI API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed AI response: {0}")]
    MalformedResponse(String),
}

/// Errors produced while posting a pull request comment.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing credential: {var} is not set")]
    MissingCredential { var: &'static str },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("GitHub API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Errors reading the input log or writing the output file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

impl FileError {
    /// Classify an I/O error raised while reading `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound { path }
        } else {
            FileError::Read { path, source }
        }
    }
}

/// Invalid values in the process environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Fatal errors of a pipeline run.
///
/// Comment failures never surface here; they are carried by
/// [`crate::pipeline::CommentOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type for the analysis client.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_carries_status_and_body() {
        let err = AnalysisError::Api {
            status: 429,
            body: "quota exhausted".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("quota exhausted"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = PublishError::MissingCredential {
            var: "GITHUB_TOKEN",
        };
        assert_eq!(err.to_string(), "missing credential: GITHUB_TOKEN is not set");
    }

    #[test]
    fn test_file_error_classifies_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FileError::read("build.log", io);
        assert!(matches!(err, FileError::NotFound { .. }));
        assert!(err.to_string().contains("build.log"));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = FileError::read("build.log", io);
        assert!(matches!(err, FileError::Read { .. }));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = AnalysisError::MalformedResponse("no candidates".into()).into();
        assert_eq!(err.to_string(), "malformed AI response: no candidates");
    }
}
