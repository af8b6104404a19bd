//! Route endpoints given on the command line.
//!
//! An endpoint is either a `lat,lng` pair or the id of a network node.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use walkroute_lib::{Coordinate, RoadNetwork};

#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Coordinate(Coordinate),
    Node(String),
}

impl Endpoint {
    /// Coordinate for this endpoint; node ids are looked up in `network`.
    pub fn resolve(&self, network: &RoadNetwork) -> Result<Coordinate> {
        match self {
            Endpoint::Coordinate(coordinate) => Ok(*coordinate),
            Endpoint::Node(id) => network
                .node(id)
                .map(|node| node.coordinate())
                .ok_or_else(|| anyhow!("Unknown node '{}'.", id)),
        }
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err("endpoint must not be empty".to_string());
        }

        if value.contains(',') {
            parse_coordinate(value).map(Endpoint::Coordinate)
        } else {
            Ok(Endpoint::Node(value.to_string()))
        }
    }
}

/// Parse a `lat,lng` pair in decimal degrees.
pub fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let value = value.trim();
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lng', got '{value}'"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude in '{value}'"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude in '{value}'"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} is outside -90..=90"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} is outside -180..=180"));
    }
    Ok(Coordinate::new(lat, lng))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Coordinate(c) => write!(f, "{},{}", c.lat, c.lng),
            Endpoint::Node(id) => f.write_str(id),
        }
    }
}
