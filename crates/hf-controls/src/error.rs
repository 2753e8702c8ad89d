//! Errors raised while configuring sensors and valves.

use thiserror::Error;

pub type ControlResult<T> = Result<T, ControlError>;

/// Rejected sensor or valve parameters.
///
/// Control laws themselves never fail once configured; out-of-range commands
/// saturate instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    #[error("Invalid control parameter: {what}")]
    InvalidArg { what: &'static str },
}
