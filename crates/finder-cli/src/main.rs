mod apply;
mod centers;
mod render;

use clap::{Parser, Subcommand};
use finder_client::FinderClient;
use tracing_subscriber::EnvFilter;

use crate::apply::{ApplyCommands, ProbeMode};
use crate::centers::CentersArgs;

#[derive(Debug, Parser)]
#[command(name = "finder-cli")]
#[command(about = "Find dental centers by weekday availability and distance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List centers, filtered by day and sorted by distance
    Centers(CentersArgs),
    /// Submit a candidacy to a center
    Apply {
        #[command(subcommand)]
        command: ApplyCommands,
    },
    /// Check that a candidacy webhook answers
    Probe {
        #[arg(long, value_enum, default_value_t = ProbeMode::Contact)]
        mode: ProbeMode,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = finder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let client = FinderClient::from_config(&config)?;
    match cli.command {
        Commands::Centers(args) => centers::run_centers(&config, &client, &args).await,
        Commands::Apply { command } => apply::run_apply(&client, command).await,
        Commands::Probe { mode } => apply::run_probe(&client, mode.into()).await,
    }
}
