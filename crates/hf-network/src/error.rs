//! Network-specific error types.

use hf_core::{BoundaryId, HfError, LinkId, NodeId};
use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Network construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Network has no nodes")]
    Empty,

    #[error("Node '{name}' has non-positive capacitance {value} J/K")]
    NonPositiveCapacitance { name: String, value: f64 },

    #[error("Link {link} has non-positive resistance {value} K/W")]
    NonPositiveResistance { link: LinkId, value: f64 },

    #[error("Boundary '{name}' has non-finite temperature {value}")]
    NonFiniteBoundary { name: String, value: f64 },

    #[error("Link {link} refers to non-existent node {node}")]
    InvalidNodeRef { link: LinkId, node: NodeId },

    #[error("Link {link} refers to non-existent boundary {boundary}")]
    InvalidBoundaryRef { link: LinkId, boundary: BoundaryId },

    #[error("Link {link} connects node {node} to itself")]
    SelfLink { link: LinkId, node: NodeId },

    #[error("Node '{name}' is not connected to the rest of the network")]
    Disconnected { name: String },

    #[error("Invalid layer '{layer}': {what}")]
    InvalidLayer { layer: String, what: &'static str },

    #[error("Subdivided layers '{first}' and '{second}' are adjacent; one of them must use a single node")]
    AdjacentSubdividedLayers { first: String, second: String },

    #[error("Invalid wall: {what}")]
    InvalidWall { what: &'static str },

    #[error(transparent)]
    Core(#[from] HfError),
}
