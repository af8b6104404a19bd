#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use walkroute_lib::{load_network, RoadNetwork};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("campus_network.json")
}

pub fn campus() -> Arc<RoadNetwork> {
    Arc::new(load_network(&fixture_path()).expect("fixture network loads"))
}

/// Id of the fixture node with no edges.
pub const ISLAND: &str = "boathouse";
