//! Coordinate-to-coordinate route planning.
//!
//! This module provides:
//! - [`PathFinder`] - snaps endpoints to the network and runs A* between them
//! - [`PathResult`] - the stitched coordinate path plus metrics
//! - [`smooth_path`] / [`path_info`] - post-processing and diagnostics
//! - [`DirectionsProvider`] / [`resolve_route`] - seam for an external
//!   directions service whose path overrides the internal one
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use walkroute_lib::{Coordinate, PathFinder, RoadNetwork, RoadType, RouteAlgorithm};
//!
//! let mut network = RoadNetwork::new();
//! network.add_node("a", 0.0, 0.0, "A").unwrap();
//! network.add_node("b", 0.0, 0.001, "B").unwrap();
//! network.add_edge("a", "b", RoadType::Main).unwrap();
//!
//! let finder = PathFinder::new(Arc::new(network));
//! let result = finder
//!     .find_path(Coordinate::new(0.0, -0.0001), Coordinate::new(0.0, 0.0011))
//!     .unwrap();
//! assert_eq!(result.algorithm, RouteAlgorithm::AStar);
//! assert_eq!(result.path.len(), 4);
//! ```

mod directions;
mod smoothing;

pub use directions::{resolve_route, DirectionsProvider, ResolvedRoute, RouteSource};
pub use smoothing::{path_info, smooth_path, PathInfo, MAX_SMOOTHED_POINTS};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::error::{Error, Result};
use crate::geo::{haversine_distance, Coordinate};
use crate::graph::{GraphNode, NodeId, RoadNetwork};
use crate::path::find_route_a_star;
use crate::spatial::SpatialIndex;

/// How a [`PathResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Both endpoints snapped to the same node; the path is the straight
    /// segment between them.
    Direct,
    /// A* search over the network.
    #[serde(rename = "astar")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Direct => "direct",
            RouteAlgorithm::AStar => "astar",
        };
        f.write_str(value)
    }
}

/// Planned route returned by [`PathFinder::find_path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Caller start, every traversed node, caller end.
    pub path: Vec<Coordinate>,
    /// Snap-in metres + weighted search cost + snap-out metres.
    ///
    /// The interior term carries the road-type multipliers, so this is a
    /// routing cost rather than a pure length. See `geographic_distance`.
    pub distance: f64,
    /// Great-circle length of `path` in metres.
    pub geographic_distance: f64,
    /// Network nodes between the two raw endpoints. A direct result reports
    /// the single shared snap node even though `path` skips it.
    pub node_count: usize,
    /// Nodes expanded by the search.
    pub explored_nodes: usize,
    pub algorithm: RouteAlgorithm,
    /// Ids of the traversed nodes, in order (the shared snap node for a
    /// direct result).
    pub nodes: Vec<NodeId>,
}

impl PathResult {
    /// Number of segments in the coordinate path.
    pub fn segment_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Route planner over a shared, read-only road network.
///
/// Cheap to clone; each [`find_path`](Self::find_path) call allocates its own
/// search state, so one finder can serve several threads at once.
#[derive(Debug, Clone)]
pub struct PathFinder {
    network: Arc<RoadNetwork>,
    spatial_index: Option<Arc<SpatialIndex>>,
    config: RouterConfig,
}

impl PathFinder {
    /// Finder with default configuration and linear-scan snapping.
    pub fn new(network: Arc<RoadNetwork>) -> Self {
        Self {
            network,
            spatial_index: None,
            config: RouterConfig::default(),
        }
    }

    /// Finder using `config`; builds a spatial index when
    /// `config.use_spatial_index` is set.
    pub fn with_config(network: Arc<RoadNetwork>, config: RouterConfig) -> Self {
        let spatial_index = config
            .use_spatial_index
            .then(|| Arc::new(SpatialIndex::build(&network)));
        Self {
            network,
            spatial_index,
            config,
        }
    }

    /// Attach a pre-built spatial index. It should have been built from the
    /// same network; a node it returns that this network lacks makes
    /// [`snap`](Self::snap) fail with [`Error::UnknownNode`].
    pub fn with_spatial_index(mut self, index: Arc<SpatialIndex>) -> Self {
        self.spatial_index = Some(index);
        self
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Nearest network node to `point` and the distance to it in metres.
    pub fn snap(&self, point: Coordinate) -> Result<(&GraphNode, f64)> {
        let snapped = match &self.spatial_index {
            Some(index) => match index.nearest(point) {
                Some((id, distance)) => {
                    let node = self
                        .network
                        .node(id)
                        .ok_or_else(|| Error::UnknownNode { id: id.to_string() })?;
                    Some((node, distance))
                }
                None => None,
            },
            None => self.network.find_nearest_node(point),
        };
        let (node, distance) = snapped.ok_or(Error::EmptyNetwork)?;

        if distance > self.config.max_snap_distance_m {
            warn!(
                node = %node.id,
                distance_m = distance,
                "coordinate snapped far from the road network"
            );
        }
        Ok((node, distance))
    }

    /// Compute a route between two arbitrary coordinates.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyNetwork`] when there is no node to snap to.
    /// - [`Error::RouteNotFound`] when the snapped nodes are not connected.
    pub fn find_path(&self, start: Coordinate, end: Coordinate) -> Result<PathResult> {
        let (start_node, snap_in) = self.snap(start)?;
        let (end_node, snap_out) = self.snap(end)?;

        if start_node.id == end_node.id {
            debug!(node = %start_node.id, "endpoints share a nearest node; using direct path");
            let distance = haversine_distance(start, end);
            return Ok(PathResult {
                path: vec![start, end],
                distance,
                geographic_distance: distance,
                node_count: 1,
                explored_nodes: 0,
                algorithm: RouteAlgorithm::Direct,
                nodes: vec![start_node.id.clone()],
            });
        }

        let outcome =
            find_route_a_star(&self.network, &start_node.id, &end_node.id).ok_or_else(|| {
                Error::RouteNotFound {
                    start: start_node.id.clone(),
                    goal: end_node.id.clone(),
                }
            })?;

        let mut path = Vec::with_capacity(outcome.nodes.len() + 2);
        path.push(start);
        for id in &outcome.nodes {
            if let Some(node) = self.network.node(id) {
                path.push(node.coordinate());
            }
        }
        path.push(end);

        let geographic_distance = path_info(&path).total_distance;
        debug!(
            from = %start_node.id,
            to = %end_node.id,
            explored = outcome.explored,
            cost = outcome.cost,
            "planned route"
        );

        Ok(PathResult {
            path,
            distance: snap_in + outcome.cost + snap_out,
            geographic_distance,
            node_count: outcome.nodes.len(),
            explored_nodes: outcome.explored,
            algorithm: RouteAlgorithm::AStar,
            nodes: outcome.nodes,
        })
    }
}
