//! Where and how the analysis text is written.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AnalysisResult, FileError};

/// Destination of the analysis text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// File target when a path is given, stdout otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p.to_path_buf()),
            None => OutputTarget::Stdout,
        }
    }
}

/// Layout of the written analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The analysis text exactly as returned.
    #[default]
    Plain,
    /// Analysis framed by a banner with timestamp and model.
    Report,
}

const RULE_WIDTH: usize = 80;

/// Render the analysis in the requested layout.
pub fn render(result: &AnalysisResult, format: OutputFormat, generated_at: DateTime<Utc>) -> String {
    match format {
        OutputFormat::Plain => result.text.clone(),
        OutputFormat::Report => {
            let rule = "=".repeat(RULE_WIDTH);
            let mut out = String::new();
            out.push_str(&format!("{rule}\n🤖 AI-POWERED BUILD FAILURE ANALYSIS\n{rule}\n"));
            out.push_str(&format!(
                "Generated: {}\n",
                generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            out.push_str(&format!("AI Model: {}\n", result.model));
            out.push_str(&format!("{rule}\n\n"));
            out.push_str(&result.text);
            out.push_str(&format!("\n\n{rule}\nEnd of Analysis\n{rule}\n"));
            out
        }
    }
}

/// Write rendered text to the target. Files are created or truncated.
pub async fn write_output(target: &OutputTarget, content: &str) -> Result<(), FileError> {
    match target {
        OutputTarget::File(path) => {
            tokio::fs::write(path, content)
                .await
                .map_err(|source| FileError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(event = "output.written", path = %path.display(), bytes = content.len());
            Ok(())
        }
        OutputTarget::Stdout => write_stdout(content).map_err(FileError::Stdout),
    }
}

fn write_stdout(content: &str) -> std::io::Result<()> {
    let mut handle = std::io::stdout().lock();
    handle.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        handle.write_all(b"\n")?;
    }
    handle.flush()
}
