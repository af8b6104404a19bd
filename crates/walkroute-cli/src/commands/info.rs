use std::io;

use anyhow::Result;
use walkroute_lib::RoadNetwork;

use crate::output::{render_info, OutputFormat};

/// Print node, edge and road type totals for the loaded network.
pub fn handle_info(network: &RoadNetwork, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_info(&mut out, network, format)?;
    Ok(())
}
