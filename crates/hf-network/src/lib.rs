//! hf-network: lumped RC thermal network layer for heatflow.
//!
//! Provides:
//! - Core network data structures (Node, Boundary, Link, ThermalNetwork)
//! - Material layers and layered walls
//! - Incremental network builder with validation
//!
//! # Example
//!
//! ```
//! use hf_network::{Layer, ThermalNetworkBuilder, Wall};
//!
//! let mut builder = ThermalNetworkBuilder::new();
//! let room = builder.add_node("room air", 72_247.0);
//! let outdoor = builder.add_boundary("outdoor", 2.0);
//! let wall = Wall::new(15.0, 7.7, 25.0)
//!     .with_layer(Layer::new("brick", 0.19, 0.811, 1820.0, 880.0));
//! let wall_nodes = builder.add_wall(room, &wall, outdoor).unwrap();
//! let network = builder.build().unwrap();
//!
//! assert_eq!(wall_nodes.len(), 1);
//! assert_eq!(network.nodes().len(), 2);
//! assert_eq!(network.links().len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod layer;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::ThermalNetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use layer::{Layer, Wall};
pub use network::{Boundary, Endpoint, Link, Node, ThermalNetwork};
