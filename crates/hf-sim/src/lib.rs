//! Discrete-time simulation of coupled envelope and heating dynamics.
//!
//! Provides:
//! - Explicit Euler update of an RC thermal network (`T_next = A·T_prev + B`)
//! - The coupled envelope + radiator + valve model with a one-step coupling lag
//! - Fixed-step simulation runner with progress reporting
//! - Parallel batch execution of independent scenarios

pub mod batch;
pub mod coupling;
pub mod error;
pub mod explicit;
pub mod model;
pub mod sim;

pub use batch::run_batch;
pub use coupling::Coupling;
pub use error::{SimError, SimResult};
pub use explicit::{ExplicitUpdater, HeatInput};
pub use model::{CoupledModel, CoupledState, DiscreteModel, HeatingLoop};
pub use sim::{SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
