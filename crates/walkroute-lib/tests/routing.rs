mod common;

use std::sync::Arc;

use walkroute_lib::{
    find_route_a_star, find_route_a_star_with, find_route_dijkstra, smooth_path, Coordinate,
    Error, PathFinder, RoadNetwork, RoadType, RouteAlgorithm, RouterConfig, SortedQueue,
};

use common::{campus, ISLAND};

/// Probe coordinates on a lattice over the campus bounding box.
fn probes() -> Vec<Coordinate> {
    let mut points = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            points.push(Coordinate::new(
                51.7485 + i as f64 * 0.0011,
                -1.2610 + j as f64 * 0.0016,
            ));
        }
    }
    points
}

#[test]
fn endpoints_are_returned_exactly() {
    let finder = PathFinder::new(campus());
    let points = probes();
    for start in points.iter().step_by(5) {
        for end in points.iter().step_by(3) {
            match finder.find_path(*start, *end) {
                Ok(result) => {
                    assert!(result.path.len() >= 2);
                    assert_eq!(result.path.first(), Some(start));
                    assert_eq!(result.path.last(), Some(end));
                    assert!(result.node_count >= 1);
                }
                Err(Error::RouteNotFound { start, goal }) => {
                    assert!(start == ISLAND || goal == ISLAND);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn same_nearest_node_gives_direct_result() {
    let network = campus();
    let finder = PathFinder::new(network.clone());
    let chapel = network.node("chapel").unwrap().coordinate();
    let start = Coordinate::new(chapel.lat + 0.0001, chapel.lng);
    let end = Coordinate::new(chapel.lat, chapel.lng + 0.0001);

    let result = finder.find_path(start, end).unwrap();
    assert_eq!(result.algorithm, RouteAlgorithm::Direct);
    assert_eq!(result.path.len(), 2);
    assert_eq!(result.nodes, vec!["chapel"]);
}

#[test]
fn a_star_matches_dijkstra_for_every_connected_pair() {
    let network = campus();
    let ids: Vec<_> = network
        .nodes()
        .iter()
        .map(|node| node.id.clone())
        .filter(|id| id != ISLAND)
        .collect();

    for start in &ids {
        for goal in &ids {
            let guided = find_route_a_star(&network, start, goal).expect("connected");
            let exhaustive = find_route_dijkstra(&network, start, goal).expect("connected");
            assert!(
                (guided.cost - exhaustive.cost).abs() < 1e-6,
                "{start} -> {goal}: {} vs {}",
                guided.cost,
                exhaustive.cost
            );
            assert!(guided.explored <= network.len());
            assert!(guided.explored <= exhaustive.explored);
        }
    }
}

#[test]
fn open_set_choice_does_not_change_routes() {
    let network = campus();
    for goal in ["lab_block", "botanic_garden", "science_park"] {
        let heap = find_route_a_star(&network, "main_gate", goal).unwrap();
        let sorted =
            find_route_a_star_with(&network, "main_gate", goal, SortedQueue::new()).unwrap();
        assert_eq!(heap, sorted);
    }
}

#[test]
fn known_cheapest_campus_route() {
    let network = campus();
    let finder = PathFinder::new(network.clone());
    let start = network.node("main_gate").unwrap().coordinate();
    let end = network.node("lab_block").unwrap().coordinate();

    let result = finder.find_path(start, end).unwrap();
    assert_eq!(
        result.nodes,
        vec![
            "main_gate",
            "refectory",
            "sports_hall",
            "east_lodge",
            "observatory",
            "lab_block"
        ]
    );
    // Endpoints are the nodes themselves, so distance is pure search cost.
    assert!((result.distance - 775.725).abs() < 0.05, "{}", result.distance);
    assert_eq!(result.path.len(), result.node_count + 2);
}

#[test]
fn island_is_unreachable() {
    let network = campus();
    let finder = PathFinder::new(network.clone());
    let island = network.node(ISLAND).unwrap().coordinate();
    let gate = network.node("main_gate").unwrap().coordinate();

    let err = finder.find_path(gate, island).unwrap_err();
    assert!(matches!(err, Error::RouteNotFound { .. }));
    assert!(format!("{err}").contains("no route found"));
}

#[test]
fn three_node_line_traverses_middle() {
    let mut network = RoadNetwork::new();
    network.add_node("A", 0.0, 0.0, "A").unwrap();
    network.add_node("B", 0.0, 0.001, "B").unwrap();
    network.add_node("C", 0.0, 0.002, "C").unwrap();
    network.add_edge("A", "B", RoadType::Main).unwrap();
    network.add_edge("B", "C", RoadType::Side).unwrap();
    let finder = PathFinder::new(Arc::new(network));

    let result = finder
        .find_path(Coordinate::new(0.00002, 0.00001), Coordinate::new(-0.00002, 0.00199))
        .unwrap();
    assert_eq!(result.algorithm, RouteAlgorithm::AStar);
    assert_eq!(result.node_count, 3);
    assert!(result.nodes.iter().any(|id| id == "B"));
}

#[test]
fn spatial_index_and_linear_scan_agree_on_campus() {
    let network = campus();
    let linear = PathFinder::new(network.clone());
    let indexed = PathFinder::with_config(
        network,
        RouterConfig {
            use_spatial_index: true,
            ..RouterConfig::default()
        },
    );

    for point in probes() {
        let (a, da) = linear.snap(point).unwrap();
        let (b, db) = indexed.snap(point).unwrap();
        assert_eq!(a.id, b.id);
        assert!((da - db).abs() < 1e-9);
    }
}

#[test]
fn smoothed_route_keeps_endpoints() {
    let network = campus();
    let finder = PathFinder::new(network);
    let start = Coordinate::new(51.7519, -1.2582);
    let end = Coordinate::new(51.7566, -1.2538);
    let result = finder.find_path(start, end).unwrap();

    let smoothed = smooth_path(&result.path, finder.config().smoothing_step_m).unwrap();
    assert!(smoothed.len() > result.path.len());
    assert_eq!(smoothed.first(), Some(&start));
    assert_eq!(smoothed.last(), Some(&end));
}
