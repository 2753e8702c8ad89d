//! Room temperature control for heatflow.
//!
//! The control chain of a thermostatic radiator valve is split in two named
//! operations:
//! - a first-order sensor lag acting on the temperature deviation
//! - a nonlinear flow characteristic mapping the sensed deviation to a mass
//!   flow command, saturated to `[0, mF_max]`
//!
//! Controllers are pure: `update` takes the previous state and returns the
//! next one, leaving history to the caller.

pub mod error;
pub mod sensor;
pub mod valve;

pub use error::{ControlError, ControlResult};
pub use sensor::{FirstOrderSensor, first_order_filter};
pub use valve::{ThermostaticValve, ValveCharacteristic, ValveState};
