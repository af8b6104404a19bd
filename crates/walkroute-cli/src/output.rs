//! Output formatting for the CLI subcommands.
//!
//! Every renderer writes to an arbitrary [`Write`] so the text and JSON views
//! can be checked without spawning the binary.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use walkroute_lib::{
    path_info, Coordinate, GraphNode, PathInfo, PathResult, RoadNetwork, RoadType,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

#[derive(Serialize)]
struct RouteReport<'a> {
    #[serde(flatten)]
    route: &'a PathResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    smoothed: Option<SmoothedReport<'a>>,
}

#[derive(Serialize)]
struct SmoothedReport<'a> {
    step_m: f64,
    info: PathInfo,
    path: &'a [Coordinate],
}

/// Densified copy of a route together with the step it was produced with.
#[derive(Debug, Clone, Copy)]
pub struct Smoothed<'a> {
    pub step_m: f64,
    pub path: &'a [Coordinate],
}

/// Render a planned route.
pub fn render_route<W: Write>(
    out: &mut W,
    network: &RoadNetwork,
    route: &PathResult,
    smoothed: Option<Smoothed<'_>>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let report = RouteReport {
                route,
                smoothed: smoothed.map(|s| SmoothedReport {
                    step_m: s.step_m,
                    info: path_info(s.path),
                    path: s.path,
                }),
            };
            write_json(out, &report)
        }
        OutputFormat::Text => {
            writeln!(out, "Route (algorithm: {}):", route.algorithm)?;
            for id in &route.nodes {
                let name = network
                    .node(id)
                    .map(|node| node.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(id.as_str());
                writeln!(out, "- {} ({})", name, id)?;
            }
            writeln!(out, "Distance: {:.1} m", route.distance)?;
            writeln!(
                out,
                "Geographic distance: {:.1} m",
                route.geographic_distance
            )?;
            writeln!(
                out,
                "Nodes: {}, segments: {}, explored: {}",
                route.node_count,
                route.segment_count(),
                route.explored_nodes
            )?;
            if let Some(smoothed) = smoothed {
                let info = path_info(smoothed.path);
                writeln!(
                    out,
                    "Smoothed: {} points at {} m step (average segment {:.2} m)",
                    smoothed.path.len(),
                    smoothed.step_m,
                    info.average_segment_length
                )?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct NearestReport<'a> {
    id: &'a str,
    name: &'a str,
    lat: f64,
    lng: f64,
    distance: f64,
}

/// Render the nodes closest to a coordinate, nearest first.
pub fn render_nearest<W: Write>(
    out: &mut W,
    matches: &[(&GraphNode, f64)],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<_> = matches
                .iter()
                .map(|(node, distance)| NearestReport {
                    id: &node.id,
                    name: &node.name,
                    lat: node.lat,
                    lng: node.lng,
                    distance: *distance,
                })
                .collect();
            write_json(out, &reports)
        }
        OutputFormat::Text => {
            for (node, distance) in matches {
                writeln!(out, "{} ({}) at {:.1} m", node.name, node.id, distance)?;
            }
            Ok(())
        }
    }
}

/// Edge totals per road type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadTypeCounts {
    pub main: usize,
    pub side: usize,
    pub path: usize,
}

impl RoadTypeCounts {
    pub fn of(network: &RoadNetwork) -> Self {
        let mut counts = Self::default();
        for node in network.nodes() {
            // Each undirected edge is stored on both endpoints.
            for edge in node.neighbours().iter().filter(|e| node.id < e.target) {
                match edge.kind {
                    RoadType::Main => counts.main += 1,
                    RoadType::Side => counts.side += 1,
                    RoadType::Path => counts.path += 1,
                }
            }
        }
        counts
    }
}

#[derive(Serialize)]
struct InfoReport {
    nodes: usize,
    edges: usize,
    road_types: RoadTypeCounts,
    isolated_nodes: usize,
}

/// Render network statistics.
pub fn render_info<W: Write>(
    out: &mut W,
    network: &RoadNetwork,
    format: OutputFormat,
) -> io::Result<()> {
    let report = InfoReport {
        nodes: network.len(),
        edges: network.edge_count(),
        road_types: RoadTypeCounts::of(network),
        isolated_nodes: network
            .nodes()
            .iter()
            .filter(|node| node.neighbours().is_empty())
            .count(),
    };

    match format {
        OutputFormat::Json => write_json(out, &report),
        OutputFormat::Text => {
            writeln!(out, "Nodes: {}", report.nodes)?;
            writeln!(out, "Edges: {}", report.edges)?;
            writeln!(
                out,
                "Road types: main {}, side {}, path {}",
                report.road_types.main, report.road_types.side, report.road_types.path
            )?;
            writeln!(out, "Isolated nodes: {}", report.isolated_nodes)
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use walkroute_lib::PathFinder;

    use super::*;

    fn network() -> Arc<RoadNetwork> {
        let mut network = RoadNetwork::new();
        network.add_node("a", 0.0, 0.0, "Alpha").unwrap();
        network.add_node("b", 0.0, 0.001, "").unwrap();
        network.add_node("c", 0.0, 0.002, "Gamma").unwrap();
        network.add_node("lonely", 1.0, 1.0, "Lonely").unwrap();
        network.add_edge("a", "b", RoadType::Main).unwrap();
        network.add_edge("b", "c", RoadType::Path).unwrap();
        Arc::new(network)
    }

    fn render_to_string(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn text_route_lists_nodes_by_name() {
        let network = network();
        let route = PathFinder::new(network.clone())
            .find_path(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.002))
            .unwrap();

        let text = render_to_string(|out| {
            render_route(out, &network, &route, None, OutputFormat::Text)
        });
        assert!(text.starts_with("Route (algorithm: astar):\n- Alpha (a)\n- b (b)\n- Gamma (c)\n"));
        assert!(text.contains("Nodes: 3, segments: 4"));
        assert!(!text.contains("Smoothed"));
    }

    #[test]
    fn json_route_includes_smoothed_section() {
        let network = network();
        let route = PathFinder::new(network.clone())
            .find_path(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.002))
            .unwrap();
        let dense = walkroute_lib::smooth_path(&route.path, 50.0).unwrap();

        let json = render_to_string(|out| {
            render_route(
                out,
                &network,
                &route,
                Some(Smoothed {
                    step_m: 50.0,
                    path: &dense,
                }),
                OutputFormat::Json,
            )
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "astar");
        assert_eq!(value["node_count"], 3);
        assert_eq!(value["smoothed"]["step_m"], 50.0);
        assert_eq!(
            value["smoothed"]["path"].as_array().unwrap().len(),
            dense.len()
        );
    }

    #[test]
    fn info_counts_each_edge_once() {
        let network = network();
        assert_eq!(
            RoadTypeCounts::of(&network),
            RoadTypeCounts {
                main: 1,
                side: 0,
                path: 1
            }
        );

        let text = render_to_string(|out| render_info(out, &network, OutputFormat::Text));
        assert_eq!(
            text,
            "Nodes: 4\nEdges: 2\nRoad types: main 1, side 0, path 1\nIsolated nodes: 1\n"
        );
    }

    #[test]
    fn nearest_json_carries_distance() {
        let network = network();
        let (node, distance) = network
            .find_nearest_node(Coordinate::new(0.0, 0.0019))
            .unwrap();
        let json = render_to_string(|out| {
            render_nearest(out, &[(node, distance)], OutputFormat::Json)
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "c");
        assert!(value[0]["distance"].as_f64().unwrap() > 10.0);
    }
}
