//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while setting up or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<hf_network::NetworkError> for SimError {
    fn from(e: hf_network::NetworkError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_components::ComponentError> for SimError {
    fn from(e: hf_components::ComponentError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_controls::ControlError> for SimError {
    fn from(e: hf_controls::ControlError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_core::error::HfError> for SimError {
    fn from(e: hf_core::error::HfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
