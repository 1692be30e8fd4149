//! `analyze_and_comment` - explain a CI build failure and post it on the PR.
//!
//! A failed comment is logged as a warning and does not change the exit
//! code; the written analysis is the primary output of the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use loglens_cli::{CommonArgs, ENV_HELP};
use loglens_core::{
    new_run_id, run_analyze_and_comment, AnalyzerConfig, CommentTarget, OutputTarget, RunSpan,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "analyze_and_comment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Analyze a CI build failure log with Gemini and comment on a GitHub pull request",
    long_about = None
)]
#[command(after_help = ENV_HELP)]
struct Cli {
    /// Path to the build log file
    log_file: PathBuf,

    /// GitHub repository as owner/name
    repo_name: String,

    /// Pull request number
    pr_number: String,

    /// Where to write the analysis (default: stdout)
    output_file: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.common.init_tracing();

    let run_id = new_run_id();
    let _span = RunSpan::enter(&run_id);

    let target = CommentTarget::parse(&cli.repo_name, &cli.pr_number)
        .context("Invalid pull request target")?;
    let config = AnalyzerConfig::from_env().context("Invalid configuration")?;
    let output = OutputTarget::from_path(cli.output_file.as_deref());

    let report = run_analyze_and_comment(
        &config,
        &cli.log_file,
        &target,
        &output,
        cli.common.format.into(),
    )
    .await
    .with_context(|| format!("Failed to analyze {}", cli.log_file.display()))?;

    // The pipeline already warned about a failed comment.
    if report.comment.is_posted() {
        info!(pr_url = %target.html_url(), "analysis posted");
    }
    Ok(())
}
