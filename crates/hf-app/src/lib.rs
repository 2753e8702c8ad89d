//! Shared application service layer for heatflow.
//!
//! Turns scenario definitions into runnable coupled models, executes them
//! and packages the results for the command line.

pub mod compile;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod run_service;

// Re-export key types for convenience
pub use compile::{CompiledScenario, compile_scenario};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, SimulationProgress};
pub use project_service::{load_scenario, resolve_scenario, save_scenario};
pub use run_service::{
    RunRequest, RunResponse, RunTimingSummary, run_batch, run_id, run_scenario, run_scenario_with_progress,
    to_records,
};
