use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the walkroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node id is inserted twice while building a network.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when an edge references a node that was never added.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when an edge would connect a node to itself.
    #[error("edge from {id} to itself is not allowed")]
    SelfLoop { id: NodeId },

    /// Raised when the network has no nodes to snap coordinates onto.
    #[error("no route possible: the road network is empty")]
    EmptyNetwork,

    /// Raised when the search exhausts the open set without reaching the goal.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: NodeId, goal: NodeId },

    /// Raised when a smoothing step is zero, negative or not finite.
    #[error("smoothing step must be a positive number of metres, got {step}")]
    InvalidStep { step: f64 },

    /// Raised when smoothing would produce more points than allowed.
    #[error("smoothing with step {step} m would produce {points} points (limit {limit})")]
    SmoothingTooDense {
        step: f64,
        points: f64,
        limit: usize,
    },

    /// Network dataset could not be located at the resolved path.
    #[error("network dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Network dataset exists but is not valid JSON for the expected schema.
    #[error("failed to parse network dataset {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Router config file could not be located.
    #[error("router config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Router config file is not valid JSON for the expected schema.
    #[error("failed to parse router config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the network dataset")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
