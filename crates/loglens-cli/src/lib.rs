//! Shared command-line plumbing for the `analyze` and `analyze_and_comment`
//! binaries.

use clap::{Args, ValueEnum};
use loglens_core::OutputFormat;
use tracing::Level;

/// Help footer listing the environment both binaries read.
pub const ENV_HELP: &str = "\
ENVIRONMENT:
    GEMINI_API_KEY         Gemini API key (required)
    GITHUB_TOKEN           GitHub token (required for commenting)
    GEMINI_MODEL           Model id [default: gemini-2.0-flash]
    GEMINI_API_BASE        Gemini API base URL
    GITHUB_API_URL         GitHub REST API base URL [default: https://api.github.com]
    LOGLENS_TIMEOUT_SECS   Per-request timeout in seconds [default: 60]
    LOGLENS_MAX_LOG_CHARS  Keep only the last N log characters [default: whole log]
    RUST_LOG               Log filter, overrides --verbose";

/// Flags common to both binaries.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Layout of the written analysis
    #[arg(long, value_enum, default_value_t = FormatArg::Plain)]
    pub format: FormatArg,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json: bool,
}

impl CommonArgs {
    /// Install the global tracing subscriber for this invocation.
    pub fn init_tracing(&self) {
        let level = if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        loglens_core::init_tracing(self.json, level);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Analysis text only
    Plain,
    /// Analysis framed by a banner with timestamp and model
    Report,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Report => OutputFormat::Report,
        }
    }
}
