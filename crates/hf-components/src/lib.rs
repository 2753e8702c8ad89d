//! hf-components: heating emitter models for heatflow.
//!
//! Provides:
//! - A finite-volume panel radiator with a nonlinear power-law output
//!
//! Components are deterministic functions of their previous state and the
//! boundary values handed in by the caller, so one step never reads the
//! outputs of the same step.
//!
//! # Example
//!
//! ```
//! use hf_components::{Radiator, RadiatorSpec};
//!
//! let radiator = Radiator::new(RadiatorSpec::default(), 10.0).unwrap();
//! let state = radiator.initial_state(17.0);
//! let step = radiator.step(&state, 90.0, 0.1, 15.0);
//!
//! assert_eq!(step.state.segment_temperatures_c.len(), 5);
//! assert!(step.total_output_w > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod radiator;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use radiator::{Radiator, RadiatorSpec, RadiatorState, RadiatorStep};
