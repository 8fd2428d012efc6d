use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use octofit::config::CODESPACE_ENV;
use octofit::{ApiClient, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "octofit-tui")]
#[command(about = "Terminal dashboard for the OctoFit fitness API")]
#[command(version)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL (overrides the codespace host)
    #[arg(long)]
    base_url: Option<String>,

    /// Codespace name the API host is derived from
    #[arg(long)]
    codespace: Option<String>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let codespace = args.codespace.or_else(|| std::env::var(CODESPACE_ENV).ok());
    let config = Config::load(args.config.as_deref())?
        .with_codespace_name(codespace)
        .with_base_url(args.base_url);

    let client = ApiClient::new(&config.api)?;
    tracing::info!("Starting dashboard against {}", client.base_url());

    octofit_tui::run(client).await
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,octofit=debug,octofit_tui=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
