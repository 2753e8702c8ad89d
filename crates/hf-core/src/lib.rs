//! hf-core: stable foundation for heatflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers, signed power)
//! - ids (stable compact IDs for network objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HfError, HfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
