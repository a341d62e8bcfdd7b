// triage-client-rs/src/main.rs
// Command-line front end for the triage API
//
// Input channels, first match wins:
// - --logs TEXT: direct text
// - --file PATH: picker, .txt/.log only
// - PATH...: dropped files, the first one is read
// - stdin otherwise
//
// Configuration: API_BASE (runtime env, .env, or build time), RUST_LOG (default: warn)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use config_rs::ClientConfig;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;
use triage_client::{view, ApiClient, LogUploader, ReadOutcome};

/// Summarize application logs with the triage API
#[derive(Parser, Debug)]
#[command(name = "log-triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send logs to the triage API and print hypotheses and next actions", long_about = None)]
struct Cli {
    /// Log text to analyze
    #[arg(long = "logs", conflicts_with_all = ["file", "dropped"])]
    logs: Option<String>,

    /// Log file to analyze (.txt or .log)
    #[arg(long = "file", short = 'f', conflicts_with = "dropped")]
    file: Option<PathBuf>,

    /// Files handed over by drag and drop; only the first is read
    #[arg(value_name = "PATH")]
    dropped: Vec<PathBuf>,

    /// Override the API base URL
    #[arg(long = "api-base")]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    config_rs::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let uploader = LogUploader::new();
    collect_input(&cli, &uploader).await?;

    let text = uploader.text();
    let logs = view::validate_input(&text).map_err(anyhow::Error::msg)?;

    let client = match cli.api_base.as_deref() {
        Some(base) => ApiClient::with_base_url(base),
        None => ApiClient::new(&ClientConfig::from_env()),
    };

    let response = client
        .submit(logs)
        .await
        .map_err(|err| anyhow::anyhow!(view::error_message(&err)))?;

    Ok(view::render(&response))
}

async fn collect_input(cli: &Cli, uploader: &LogUploader) -> anyhow::Result<()> {
    if let Some(logs) = &cli.logs {
        uploader.edit_text(logs.clone());
        return Ok(());
    }

    if let Some(path) = &cli.file {
        uploader.pick_file(path).await?;
        return Ok(());
    }

    if !cli.dropped.is_empty() {
        uploader.drag_enter();
        let (_, outcome) = uploader.drop_files(&cli.dropped).await;
        if outcome? == ReadOutcome::Stale {
            tracing::warn!("Dropped file was superseded before it finished reading");
        }
        return Ok(());
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read logs from stdin")?;
    uploader.edit_text(buffer);
    Ok(())
}
