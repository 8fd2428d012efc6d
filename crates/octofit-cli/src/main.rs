use std::path::PathBuf;

use clap::{Parser, Subcommand};
use octofit::config::CODESPACE_ENV;
use octofit::{ApiClient, Config, Resource};
use octofit_cli::commands::{ConfigCommand, ListCommand};
use octofit_cli::error::CliResult;
use octofit_cli::output::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "octofit-cli")]
#[command(about = "OctoFit CLI - Fitness tracker dashboard in the terminal")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(long, global = true, help = "API base URL (overrides the codespace host)")]
    pub base_url: Option<String>,

    #[clap(long, global = true, help = "Codespace name the API host is derived from")]
    pub codespace: Option<String>,

    #[clap(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "List users")]
    Users,

    #[clap(about = "List activities")]
    Activities,

    #[clap(about = "List teams")]
    Teams,

    #[clap(about = "Show the competitive leaderboard")]
    Leaderboard,

    #[clap(about = "List suggested workouts")]
    Workouts,

    #[clap(about = "Configuration commands")]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let codespace = cli
        .codespace
        .clone()
        .or_else(|| std::env::var(CODESPACE_ENV).ok());
    let config = Config::load(cli.config.as_deref())?
        .with_codespace_name(codespace)
        .with_base_url(cli.base_url.clone());

    let resource = match &cli.command {
        Command::Config(cmd) => return cmd.execute(&config, cli.config.as_deref(), format),
        Command::Users => Resource::Users,
        Command::Activities => Resource::Activities,
        Command::Teams => Resource::Teams,
        Command::Leaderboard => Resource::Leaderboard,
        Command::Workouts => Resource::Workouts,
    };

    let client = ApiClient::new(&config.api)?;
    tracing::debug!("Using API root {}", client.base_url());
    ListCommand::new(resource).execute(&client, format).await
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "info,octofit=debug,octofit_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
