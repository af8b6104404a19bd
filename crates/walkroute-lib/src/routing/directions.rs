use serde::Serialize;
use tracing::debug;

use super::{PathFinder, PathResult};
use crate::error::Result;
use crate::geo::Coordinate;

/// External directions service consulted before the internal network.
///
/// Implementations return `None` when they are unavailable or have no route;
/// the core never depends on one being present.
pub trait DirectionsProvider: Send + Sync {
    fn directions(&self, start: Coordinate, end: Coordinate) -> Option<Vec<Coordinate>>;
}

/// Which side produced a [`ResolvedRoute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    External,
    Internal,
}

/// Route chosen by [`resolve_route`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub source: RouteSource,
    pub path: Vec<Coordinate>,
    /// Present only when the internal path finder produced the route.
    pub internal: Option<PathResult>,
}

/// Prefer the provider's path when it returns at least two points, otherwise
/// plan on the internal network.
pub fn resolve_route(
    finder: &PathFinder,
    provider: Option<&dyn DirectionsProvider>,
    start: Coordinate,
    end: Coordinate,
) -> Result<ResolvedRoute> {
    if let Some(path) = provider.and_then(|provider| provider.directions(start, end)) {
        if path.len() >= 2 {
            debug!(points = path.len(), "using external directions");
            return Ok(ResolvedRoute {
                source: RouteSource::External,
                path,
                internal: None,
            });
        }
        debug!("external directions returned a degenerate path; ignoring");
    }

    let result = finder.find_path(start, end)?;
    Ok(ResolvedRoute {
        source: RouteSource::Internal,
        path: result.path.clone(),
        internal: Some(result),
    })
}
