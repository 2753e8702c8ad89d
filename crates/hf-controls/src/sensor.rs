//! Sensor lag.
//!
//! A sensing element (the wax or liquid bulb of a TRV) follows the quantity
//! it measures with first-order dynamics. Sampled at a fixed step the exact
//! discrete solution is an exponential blend of the previous reading and the
//! new raw value, which stays stable for any `dt / tau`.

use crate::error::{ControlError, ControlResult};
use hf_core::ensure_positive;
use serde::{Deserialize, Serialize};

/// One step of a first-order lag with time constant `tau`.
///
/// `sensed = prev * e^(-dt/tau) + raw * (1 - e^(-dt/tau))`
///
/// # Example
///
/// ```
/// use hf_controls::first_order_filter;
///
/// // A step much longer than tau passes the raw value straight through.
/// let sensed = first_order_filter(0.0, 3.0, 0.002, 10.0);
/// assert_eq!(sensed, 3.0);
/// ```
pub fn first_order_filter(prev_sensed: f64, raw: f64, tau_s: f64, dt_s: f64) -> f64 {
    let alpha = (-dt_s / tau_s).exp();
    prev_sensed * alpha + raw * (1.0 - alpha)
}

/// First-order sensor with a fixed time constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FirstOrderSensor {
    /// Time constant (seconds), must be positive
    pub tau_s: f64,
}

impl FirstOrderSensor {
    /// Create a sensor from its time constant.
    ///
    /// # Errors
    ///
    /// Returns error if `tau_s` is not a positive finite number.
    pub fn new(tau_s: f64) -> ControlResult<Self> {
        let tau_s = ensure_positive(tau_s, "tau").map_err(|_| ControlError::InvalidArg {
            what: "sensor time constant must be positive",
        })?;
        Ok(Self { tau_s })
    }

    /// Create a sensor from its gain `K`, with `tau = 1/K`.
    pub fn from_gain(gain_per_s: f64) -> ControlResult<Self> {
        let gain_per_s = ensure_positive(gain_per_s, "gain").map_err(|_| ControlError::InvalidArg {
            what: "sensor gain must be positive",
        })?;
        Self::new(1.0 / gain_per_s)
    }

    /// Advance the sensed value by `dt_s` towards `raw`.
    pub fn sense(&self, prev_sensed: f64, raw: f64, dt_s: f64) -> f64 {
        first_order_filter(prev_sensed, raw, self.tau_s, dt_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_one_time_constant() {
        let sensed = first_order_filter(0.0, 1.0, 2.0, 2.0);
        assert!((sensed - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn filter_holds_steady_value() {
        assert_eq!(first_order_filter(4.0, 4.0, 30.0, 10.0), 4.0);
    }

    #[test]
    fn from_gain_inverts() {
        let s = FirstOrderSensor::from_gain(500.0).unwrap();
        assert!((s.tau_s - 0.002).abs() < 1e-15);
    }

    #[test]
    fn invalid_sensor() {
        assert!(FirstOrderSensor::new(0.0).is_err());
        assert!(FirstOrderSensor::new(-1.0).is_err());
        assert!(FirstOrderSensor::from_gain(0.0).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn filter_output_between_inputs(
                prev in -50.0f64..50.0,
                raw in -50.0f64..50.0,
                tau in 0.001f64..1000.0,
                dt in 0.001f64..1000.0,
            ) {
                let out = first_order_filter(prev, raw, tau, dt);
                let lo = prev.min(raw) - 1e-9;
                let hi = prev.max(raw) + 1e-9;
                prop_assert!(out >= lo && out <= hi);
            }
        }
    }
}
