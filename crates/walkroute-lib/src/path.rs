use tracing::debug;

use crate::geo::haversine_distance;
use crate::graph::{GraphNode, NodeId, RoadNetwork};
use crate::queue::{HeapQueue, OpenSet};

/// Result of a node-to-node search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Node ids from start to goal, both included.
    pub nodes: Vec<NodeId>,
    /// Accumulated edge weight along `nodes`.
    pub cost: f64,
    /// Number of nodes taken off the open set and expanded (stale queue
    /// duplicates are not counted).
    pub explored: usize,
}

/// Run A* between two node ids with the Haversine distance to the goal as the
/// heuristic.
///
/// Returns `None` when either id is unknown or the goal is unreachable.
pub fn find_route_a_star(network: &RoadNetwork, start: &str, goal: &str) -> Option<SearchOutcome> {
    find_route_a_star_with(network, start, goal, HeapQueue::with_capacity(network.len()))
}

/// A* over a caller-supplied open set implementation.
pub fn find_route_a_star_with<Q>(
    network: &RoadNetwork,
    start: &str,
    goal: &str,
    open: Q,
) -> Option<SearchOutcome>
where
    Q: OpenSet<usize>,
{
    let start_index = network.index_of(start)?;
    let goal_index = network.index_of(goal)?;
    let target = network.node_at(goal_index).coordinate();

    search(
        network,
        start_index,
        goal_index,
        |node: &GraphNode| haversine_distance(node.coordinate(), target),
        open,
    )
}

/// Run Dijkstra's algorithm (A* with a zero heuristic) between two node ids.
pub fn find_route_dijkstra(network: &RoadNetwork, start: &str, goal: &str) -> Option<SearchOutcome> {
    let start_index = network.index_of(start)?;
    let goal_index = network.index_of(goal)?;

    search(
        network,
        start_index,
        goal_index,
        |_: &GraphNode| 0.0,
        HeapQueue::with_capacity(network.len()),
    )
}

/// Best-first search without decrease-key.
///
/// A node is expanded at most once. Improved neighbours are simply queued
/// again, and a dequeued node that is already closed is a stale duplicate and
/// gets skipped. Never reopening a closed node is only correct when the
/// heuristic is consistent; Haversine distance is, because every edge weight
/// is at least the great-circle distance between its endpoints.
fn search<H, Q>(
    network: &RoadNetwork,
    start: usize,
    goal: usize,
    heuristic: H,
    mut open: Q,
) -> Option<SearchOutcome>
where
    H: Fn(&GraphNode) -> f64,
    Q: OpenSet<usize>,
{
    let node_count = network.len();
    let mut g_score = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<usize>> = vec![None; node_count];
    let mut closed = vec![false; node_count];
    let mut explored = 0usize;

    g_score[start] = 0.0;
    open.enqueue(start, heuristic(network.node_at(start)));

    while let Some((current, _)) = open.dequeue() {
        if closed[current] {
            continue;
        }
        explored += 1;

        if current == goal {
            let nodes = reconstruct_path(network, &parents, start, goal);
            debug!(
                explored,
                cost = g_score[goal],
                hops = nodes.len().saturating_sub(1),
                "search reached goal"
            );
            return Some(SearchOutcome {
                nodes,
                cost: g_score[goal],
                explored,
            });
        }
        closed[current] = true;

        let current_score = g_score[current];
        for edge in network.node_at(current).neighbours() {
            let next = edge.target_index;
            if closed[next] {
                continue;
            }

            let tentative_g = current_score + edge.weight;
            if tentative_g < g_score[next] {
                g_score[next] = tentative_g;
                parents[next] = Some(current);
                let estimate = tentative_g + heuristic(network.node_at(next));
                open.enqueue(next, estimate);
            }
        }
    }

    debug!(explored, "open set exhausted before reaching goal");
    None
}

fn reconstruct_path(
    network: &RoadNetwork,
    parents: &[Option<usize>],
    start: usize,
    goal: usize,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        path.push(network.node_at(index).id.clone());
        if index == start {
            break;
        }
        current = parents[index];
    }
    path.reverse();
    path
}
