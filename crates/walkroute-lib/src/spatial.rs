//! KD-tree spatial index for nearest-node snapping.
//!
//! Nodes are indexed as points on the unit sphere. Squared chord length
//! between two such points grows monotonically with their great-circle
//! distance, so the tree's nearest candidates are also the Haversine-nearest
//! ones. Nodes that map to the same point share one tree entry, so any
//! number of co-located nodes can be indexed.
//!
//! Candidates are re-ranked with [`haversine_distance`] and ties are broken
//! by node insertion order. A query keeps widening its candidate set until
//! every position at least as close as the last kept node has been seen, so
//! [`SpatialIndex::nearest`] agrees with [`RoadNetwork::find_nearest_node`]
//! whatever the number of tied nodes (up to floating-point rounding between
//! chord and Haversine distances of distinct positions).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::info;

use crate::geo::{haversine_distance, Coordinate};
use crate::graph::{NodeId, RoadNetwork};

/// KD-tree bucket size (kiddo default). Tree points are distinct, so the
/// bucket can never overflow with items at one position.
const BUCKET_SIZE: usize = 32;

/// Initial number of tree positions fetched per query.
const MIN_CANDIDATES: usize = 8;

/// Precomputed spatial index over the nodes of one [`RoadNetwork`].
pub struct SpatialIndex {
    /// Item is an index into `positions`.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    /// Node insertion indices per distinct tree point, ascending.
    positions: Vec<Vec<usize>>,
    ids: Vec<NodeId>,
    coords: Vec<Coordinate>,
}

/// Exact identity of a tree point; `-0.0` and `0.0` are the same point.
fn point_key(point: &[f64; 3]) -> [u64; 3] {
    point.map(|component| (component + 0.0).to_bits())
}

impl SpatialIndex {
    /// Build an index from every node of `network`.
    pub fn build(network: &RoadNetwork) -> Self {
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        let mut positions: Vec<Vec<usize>> = Vec::new();
        let mut by_point: HashMap<[u64; 3], usize> = HashMap::new();
        let mut ids = Vec::with_capacity(network.len());
        let mut coords = Vec::with_capacity(network.len());

        for (index, node) in network.nodes().iter().enumerate() {
            let coordinate = node.coordinate();
            let point = coordinate.to_unit_vector();
            let position = *by_point.entry(point_key(&point)).or_insert_with(|| {
                tree.add(&point, positions.len());
                positions.push(Vec::new());
                positions.len() - 1
            });
            positions[position].push(index);
            ids.push(node.id.clone());
            coords.push(coordinate);
        }

        info!(
            node_count = ids.len(),
            position_count = positions.len(),
            "built spatial index"
        );

        Self {
            tree,
            positions,
            ids,
            coords,
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Nearest node to `point` and its distance in metres.
    pub fn nearest(&self, point: Coordinate) -> Option<(&str, f64)> {
        self.nearest_n(point, 1).into_iter().next()
    }

    /// Up to `k` nearest nodes, sorted by distance then insertion order.
    pub fn nearest_n(&self, point: Coordinate, k: usize) -> Vec<(&str, f64)> {
        if k == 0 || self.positions.is_empty() {
            return Vec::new();
        }

        let query = point.to_unit_vector();
        let mut fetch_count = k.max(MIN_CANDIDATES).min(self.positions.len());

        loop {
            let candidates = self
                .tree
                .nearest_n::<SquaredEuclidean>(&query, fetch_count);
            let frontier = candidates
                .last()
                .map(|neighbour| neighbour.distance)
                .unwrap_or(f64::INFINITY);

            // (node index, haversine metres, squared chord of its position)
            let mut ranked: Vec<(usize, f64, f64)> = candidates
                .iter()
                .flat_map(|neighbour| {
                    self.positions[neighbour.item].iter().map(move |&index| {
                        (
                            index,
                            haversine_distance(point, self.coords[index]),
                            neighbour.distance,
                        )
                    })
                })
                .collect();
            ranked.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            ranked.truncate(k);

            // Unfetched positions lie at chord >= frontier.
            let exhausted = fetch_count >= self.positions.len();
            let settled = ranked
                .last()
                .map_or(true, |&(_, _, chord)| chord < frontier);
            if exhausted || settled {
                return ranked
                    .into_iter()
                    .map(|(index, distance, _)| (self.ids[index].as_str(), distance))
                    .collect();
            }
            fetch_count = (fetch_count * 2).min(self.positions.len());
        }
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.ids.len())
            .field("positions", &self.positions.len())
            .finish_non_exhaustive()
    }
}
