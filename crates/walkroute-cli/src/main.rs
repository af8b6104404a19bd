use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use walkroute_cli::commands::info::handle_info;
use walkroute_cli::commands::nearest::{handle_nearest, NearestArgs};
use walkroute_cli::commands::route::{handle_route, RouteArgs};
use walkroute_cli::output::OutputFormat;
use walkroute_lib::{load_network, resolve_network_path, RoadNetwork, RouterConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Walking route planner over a static road network")]
struct Cli {
    /// Road network JSON file (overrides WALKROUTE_NETWORK and the default location).
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Router configuration file (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a walking route between two endpoints.
    Route(RouteArgs),
    /// Find the network node(s) nearest to a coordinate.
    Nearest(NearestArgs),
    /// Summarise the loaded road network.
    Info,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let network = load(cli.network.as_ref())?;

    match &cli.command {
        Command::Route(args) => handle_route(network, config, args, cli.format),
        Command::Nearest(args) => handle_nearest(network, config, args, cli.format),
        Command::Info => handle_info(&network, cli.format),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RouterConfig> {
    match path {
        Some(path) => RouterConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(RouterConfig::default()),
    }
}

fn load(explicit: Option<&PathBuf>) -> Result<Arc<RoadNetwork>> {
    let path = resolve_network_path(explicit.map(PathBuf::as_path))
        .context("failed to locate the road network dataset")?;
    let network = load_network(&path)
        .with_context(|| format!("failed to load road network from {}", path.display()))?;
    Ok(Arc::new(network))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
