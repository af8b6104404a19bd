use std::io;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use walkroute_lib::{smooth_path, Error as LibError, PathFinder, RoadNetwork, RouterConfig};

use crate::endpoint::Endpoint;
use crate::output::{render_route, OutputFormat, Smoothed};

#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Start point as `lat,lng` or a node id.
    #[arg(long, allow_hyphen_values = true)]
    pub from: Endpoint,
    /// Destination as `lat,lng` or a node id.
    #[arg(long, allow_hyphen_values = true)]
    pub to: Endpoint,
    /// Densify the route so no gap exceeds the smoothing step.
    #[arg(long)]
    pub smooth: bool,
    /// Smoothing step in metres (defaults to the configured step).
    #[arg(long, requires = "smooth")]
    pub step: Option<f64>,
    /// Snap endpoints with the KD-tree index instead of a linear scan.
    #[arg(long)]
    pub spatial_index: bool,
}

/// Plan a route between two endpoints and print it.
pub fn handle_route(
    network: Arc<RoadNetwork>,
    mut config: RouterConfig,
    args: &RouteArgs,
    format: OutputFormat,
) -> Result<()> {
    config.use_spatial_index |= args.spatial_index;
    let step = args.step.unwrap_or(config.smoothing_step_m);
    let finder = PathFinder::with_config(network, config);

    let start = args.from.resolve(finder.network())?;
    let end = args.to.resolve(finder.network())?;

    let route = finder
        .find_path(start, end)
        .map_err(|err| handle_route_failure(err, &args.from, &args.to))?;

    let smoothed = if args.smooth {
        Some(
            smooth_path(&route.path, step)
                .with_context(|| format!("failed to smooth route with step {step}"))?,
        )
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_route(
        &mut out,
        finder.network(),
        &route,
        smoothed.as_deref().map(|path| Smoothed { step_m: step, path }),
        format,
    )?;
    Ok(())
}

fn handle_route_failure(err: LibError, from: &Endpoint, to: &Endpoint) -> anyhow::Error {
    match err {
        LibError::RouteNotFound { start, goal } => {
            anyhow!(format_route_not_found_message(from, to, &start, &goal))
        }
        LibError::EmptyNetwork => anyhow!(
            "The road network is empty. Point --network at a dataset with at least one node."
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_route_not_found_message(
    from: &Endpoint,
    to: &Endpoint,
    start_node: &str,
    goal_node: &str,
) -> String {
    let mut message = format!("No route found between {} and {}.", from, to);
    message.push_str(&format!(
        " The endpoints snapped to '{}' and '{}', which are not connected.",
        start_node, goal_node
    ));
    message.push_str(" Try endpoints closer to the main network.");
    message
}
