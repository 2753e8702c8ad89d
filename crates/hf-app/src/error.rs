//! Error types for the hf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Scenario not found: {path}")]
    ScenarioNotFound { path: PathBuf },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<hf_project::ProjectError> for AppError {
    fn from(err: hf_project::ProjectError) -> Self {
        match err {
            hf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<hf_project::ValidationError> for AppError {
    fn from(err: hf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hf_network::NetworkError> for AppError {
    fn from(err: hf_network::NetworkError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hf_components::ComponentError> for AppError {
    fn from(err: hf_components::ComponentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hf_controls::ControlError> for AppError {
    fn from(err: hf_controls::ControlError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hf_sim::SimError> for AppError {
    fn from(err: hf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<hf_results::ResultsError> for AppError {
    fn from(err: hf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
