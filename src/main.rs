use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cardlot::config::{self, RunConfig};
use cardlot::pipeline;
use cardlot::services::ocr_service::{VisionClient, DEFAULT_ENDPOINT};

#[derive(Debug, Parser)]
#[command(
    name = "cardlot",
    version,
    about = "Batch business-card OCR extraction pipeline"
)]
struct Cli {
    /// Data root holding one folder per card lot. Processed folders are
    /// deleted after their spreadsheet is written.
    #[arg(long, env = "CARDLOT_DATA_DIR")]
    data_dir: PathBuf,

    /// Directory the per-lot spreadsheets are written to.
    #[arg(long, env = "CARDLOT_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// JSON credentials file ({"api_key": "..."}). Falls back to
    /// credentials.json under the platform config directory.
    #[arg(long, env = "CARDLOT_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// OCR service base URL.
    #[arg(long, env = "CARDLOT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Suppress the progress bar.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let credentials_path = cli
        .credentials
        .or_else(config::default_credentials_path)
        .context("no credentials file given and no platform config directory found")?;
    let credentials = config::load_credentials(&credentials_path)
        .with_context(|| format!("loading credentials from {}", credentials_path.display()))?;

    let client = VisionClient::new(credentials.api_key, cli.endpoint)?;
    let run_config = RunConfig {
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
        quiet: cli.quiet,
    };

    let summary = pipeline::run(&run_config, &client)?;
    info!(
        folders = summary.folders_processed,
        failed = summary.folders_failed,
        rows = summary.total_rows,
        "run complete"
    );
    for report in summary.reports.iter().filter(|r| r.is_failure()) {
        info!(folder = %report.folder, error = report.error.as_deref().unwrap_or(""), "left unprocessed");
    }

    if summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
