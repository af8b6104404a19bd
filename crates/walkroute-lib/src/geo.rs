//! Geodesy helpers shared by graph construction, snapping and the A*
//! heuristic.
//!
//! Every distance in the crate goes through [`haversine_distance`], so edge
//! weights and the search heuristic are measured with the same ruler. That is
//! what keeps the heuristic consistent with edge costs.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84-style coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(*self, *other)
    }

    /// Position on the unit sphere. Chord length between two such vectors is
    /// monotonic in great-circle distance, which is what the KD-tree relies on.
    pub(crate) fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lng = self.lng.to_radians();
        [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in metres.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Linear interpolation in degree space, `t` in `[0, 1]`.
pub fn interpolate(a: Coordinate, b: Coordinate, t: f64) -> Coordinate {
    Coordinate {
        lat: a.lat + (b.lat - a.lat) * t,
        lng: a.lng + (b.lng - a.lng) * t,
    }
}
