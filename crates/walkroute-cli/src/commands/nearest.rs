use std::io;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use walkroute_lib::{Coordinate, PathFinder, RoadNetwork, RouterConfig, SpatialIndex};

use crate::endpoint::parse_coordinate;
use crate::output::{render_nearest, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct NearestArgs {
    /// Query point as `lat,lng`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
    pub at: Coordinate,
    /// Number of nodes to list, nearest first.
    #[arg(long, default_value_t = 1)]
    pub count: usize,
    /// Snap with the KD-tree index instead of a linear scan.
    #[arg(long)]
    pub spatial_index: bool,
}

/// Print the node(s) a coordinate snaps to.
pub fn handle_nearest(
    network: Arc<RoadNetwork>,
    mut config: RouterConfig,
    args: &NearestArgs,
    format: OutputFormat,
) -> Result<()> {
    if network.is_empty() {
        bail!("The road network is empty; there is no node to snap to.");
    }
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    config.use_spatial_index |= args.spatial_index;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.count == 1 {
        let finder = PathFinder::with_config(network, config);
        let (node, distance) = finder.snap(args.at)?;
        render_nearest(&mut out, &[(node, distance)], format)?;
        return Ok(());
    }

    let index = SpatialIndex::build(&network);
    let matches: Vec<_> = index
        .nearest_n(args.at, args.count)
        .into_iter()
        .filter_map(|(id, distance)| network.node(id).map(|node| (node, distance)))
        .collect();
    render_nearest(&mut out, &matches, format)?;
    Ok(())
}
