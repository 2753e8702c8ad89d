//! Error types for component construction.

use hf_core::error::HfError;
use thiserror::Error;

/// Errors that can occur while configuring a component.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HfError::InvalidArg { what },
            ComponentError::InvalidArg { what } => HfError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "water mass" };
        assert!(err.to_string().contains("water mass"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let hf_err: HfError = comp_err.into();
        assert!(matches!(hf_err, HfError::InvalidArg { .. }));
    }
}
