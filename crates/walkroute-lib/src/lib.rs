//! walkroute library entry points.
//!
//! This crate loads a static road network, snaps arbitrary coordinates onto
//! it and runs A* to produce walking routes. Higher-level consumers (the CLI,
//! services embedding the router) should only depend on the items exported
//! here instead of reimplementing behavior.
//!
//! The network is built once and shared read-only through an
//! [`std::sync::Arc`]; there is no global router instance.

#![deny(warnings)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod path;
pub mod queue;
pub mod routing;
pub mod spatial;

pub use config::RouterConfig;
pub use dataset::{
    default_network_path, load_network, resolve_network_path, EdgeRecord, NetworkDataset,
    NodeRecord, NETWORK_PATH_ENV,
};
pub use error::{Error, Result};
pub use geo::{haversine_distance, interpolate, Coordinate, EARTH_RADIUS_M};
pub use graph::{Edge, EdgeInfo, GraphNode, NodeId, RoadNetwork, RoadType};
pub use path::{find_route_a_star, find_route_a_star_with, find_route_dijkstra, SearchOutcome};
pub use queue::{HeapQueue, OpenSet, SortedQueue};
pub use routing::{
    path_info, resolve_route, smooth_path, DirectionsProvider, PathFinder, PathInfo, PathResult,
    ResolvedRoute, RouteAlgorithm, RouteSource, MAX_SMOOTHED_POINTS,
};
pub use spatial::SpatialIndex;
