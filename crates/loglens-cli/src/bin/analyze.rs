//! `analyze` - explain a CI build failure with Gemini.
//!
//! Reads a build log, asks the model for root cause, error location and
//! fixes, and writes the answer to a file or stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use loglens_cli::{CommonArgs, ENV_HELP};
use loglens_core::{new_run_id, run_analyze, AnalyzerConfig, OutputTarget, RunSpan};
use tracing::info;

#[derive(Parser)]
#[command(name = "analyze")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze a CI build failure log with Gemini", long_about = None)]
#[command(after_help = ENV_HELP)]
struct Cli {
    /// Path to the build log file
    log_file: PathBuf,

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

    let config = AnalyzerConfig::from_env().context("Invalid configuration")?;
    let output = OutputTarget::from_path(cli.output_file.as_deref());

    let analysis = run_analyze(&config, &cli.log_file, &output, cli.common.format.into())
        .await
        .with_context(|| format!("Failed to analyze {}", cli.log_file.display()))?;

    info!(
        model = %analysis.model,
        duration_ms = analysis.duration_ms,
        "analysis complete"
    );
    Ok(())
}
