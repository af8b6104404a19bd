use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{haversine_distance, Coordinate};

/// Identifier of a node, unique within one [`RoadNetwork`].
pub type NodeId = String;

/// Classification for the edge used in the routing graph.
///
/// The type only selects a cost multiplier: side streets and foot paths are
/// priced as slower than main roads over the same physical distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Main,
    Side,
    Path,
}

impl RoadType {
    /// Multiplier applied to geographic distance to obtain the edge weight.
    /// Never below 1.0, so weights never undercut the Haversine heuristic.
    pub fn multiplier(self) -> f64 {
        match self {
            RoadType::Main => 1.0,
            RoadType::Side => 1.2,
            RoadType::Path => 1.5,
        }
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RoadType::Main => "main",
            RoadType::Side => "side",
            RoadType::Path => "path",
        };
        f.write_str(value)
    }
}

/// Adjacency record stored on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub kind: RoadType,
    /// Great-circle distance in metres.
    pub distance: f64,
    /// `distance * kind.multiplier()`.
    pub weight: f64,
    pub(crate) target_index: usize,
}

/// Edge metadata keyed by a directed `(from, to)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    pub kind: RoadType,
    pub distance: f64,
    pub weight: f64,
}

/// Vertex of the road network.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    neighbours: Vec<Edge>,
}

impl GraphNode {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Outgoing adjacency records in insertion order.
    pub fn neighbours(&self) -> &[Edge] {
        &self.neighbours
    }
}

/// Static, undirected, weighted road graph.
///
/// Nodes keep their insertion order. Every lookup that has to pick between
/// equal candidates (nearest-node ties, neighbour expansion order) follows
/// that order, so results are reproducible for a fixed dataset.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    edges: HashMap<(NodeId, NodeId), EdgeInfo>,
    edge_count: usize,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with an empty adjacency list.
    ///
    /// A repeated id is a malformed dataset and is rejected rather than
    /// overwritten.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        lat: f64,
        lng: f64,
        name: impl Into<String>,
    ) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }

        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(GraphNode {
            id,
            name: name.into(),
            lat,
            lng,
            neighbours: Vec::new(),
        });
        Ok(())
    }

    /// Connect two existing nodes in both directions.
    pub fn add_edge(&mut self, from: &str, to: &str, kind: RoadType) -> Result<()> {
        let from_index = self.require(from)?;
        let to_index = self.require(to)?;
        if from_index == to_index {
            return Err(Error::SelfLoop { id: from.to_string() });
        }

        let distance = haversine_distance(
            self.nodes[from_index].coordinate(),
            self.nodes[to_index].coordinate(),
        );
        let info = EdgeInfo {
            kind,
            distance,
            weight: distance * kind.multiplier(),
        };

        self.link(from_index, to_index, info);
        self.link(to_index, from_index, info);
        self.edge_count += 1;
        Ok(())
    }

    fn link(&mut self, from_index: usize, to_index: usize, info: EdgeInfo) {
        let target = self.nodes[to_index].id.clone();
        let source = self.nodes[from_index].id.clone();
        self.nodes[from_index].neighbours.push(Edge {
            target: target.clone(),
            kind: info.kind,
            distance: info.distance,
            weight: info.weight,
            target_index: to_index,
        });
        self.edges.insert((source, target), info);
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode { id: id.to_string() })
    }

    /// Node closest to `point` by great-circle distance, with that distance
    /// in metres.
    ///
    /// Linear scan. On an exact tie the node inserted first wins, which
    /// decides whether two equidistant endpoints snap to the same node.
    pub fn find_nearest_node(&self, point: Coordinate) -> Option<(&GraphNode, f64)> {
        let mut best: Option<(&GraphNode, f64)> = None;
        for node in &self.nodes {
            let distance = haversine_distance(point, node.coordinate());
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((node, distance)),
            }
        }
        best
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Stored metadata for the directed pair, if that edge was added.
    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeInfo> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.node(id).map(GraphNode::neighbours).unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges added.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, index: usize) -> &GraphNode {
        &self.nodes[index]
    }
}
