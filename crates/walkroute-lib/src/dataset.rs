//! Static road network datasets.
//!
//! A dataset is a JSON document with a node table and an edge table:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "gate", "lat": 51.7548, "lng": -1.2544, "name": "Main Gate" }],
//!   "edges": [{ "from": "gate", "to": "library", "type": "main" }]
//! }
//! ```
//!
//! Building a [`RoadNetwork`] from it validates the tables, so a bad node or
//! edge reference fails at load time instead of at query time.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadNetwork, RoadType};

/// Default filename for the network dataset in the platform data directory.
const NETWORK_FILENAME: &str = "network.json";

/// Environment variable overriding the dataset location.
pub const NETWORK_PATH_ENV: &str = "WALKROUTE_NETWORK";

/// Row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: String,
}

/// Row of the edge table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: RoadType,
}

/// Raw node and edge tables as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDataset {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl NetworkDataset {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl RoadNetwork {
    /// Build a network from dataset tables, failing on the first duplicate
    /// node or dangling edge reference.
    pub fn from_dataset(dataset: &NetworkDataset) -> Result<Self> {
        let mut network = RoadNetwork::new();
        for node in &dataset.nodes {
            network.add_node(node.id.clone(), node.lat, node.lng, node.name.clone())?;
        }
        for edge in &dataset.edges {
            network.add_edge(&edge.from, &edge.to, edge.kind)?;
        }
        Ok(network)
    }
}

/// Read and validate a network dataset from `path`.
pub fn load_network(path: &Path) -> Result<RoadNetwork> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path)?;
    let dataset = NetworkDataset::from_json(&raw).map_err(|source| Error::DatasetParse {
        path: path.to_path_buf(),
        source,
    })?;
    let network = RoadNetwork::from_dataset(&dataset)?;

    info!(
        path = %path.display(),
        nodes = network.len(),
        edges = network.edge_count(),
        "loaded road network"
    );
    Ok(network)
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "walkroute", "walkroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(NETWORK_FILENAME))
}

/// Pick the dataset path: explicit argument, then `WALKROUTE_NETWORK`, then
/// the platform data directory.
pub fn resolve_network_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_with_env(explicit, env::var_os(NETWORK_PATH_ENV))
}

fn resolve_with_env(explicit: Option<&Path>, env_value: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicit network path");
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), "using network path from {}", NETWORK_PATH_ENV);
        return Ok(path);
    }
    default_network_path()
}
