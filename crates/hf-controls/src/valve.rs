//! Thermostatic radiator valve.

use crate::error::{ControlError, ControlResult};
use crate::sensor::FirstOrderSensor;
use hf_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Quadratic flow characteristic of a TRV.
///
/// For a sensed deviation `dT = setpoint - T_room`:
///
/// ```text
/// mF = 0                                        if dT <= 0
/// mF = clamp((Xk·dT² + Yk·dT) / 3600, 0, max)   otherwise
/// ```
///
/// The coefficients are fitted in kg/h, hence the division by 3600.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValveCharacteristic {
    /// Quadratic coefficient (kg/h/K²)
    pub xk: f64,
    /// Linear coefficient (kg/h/K)
    pub yk: f64,
    /// Fully open mass flow (kg/s)
    pub max_flow_kgps: f64,
}

impl Default for ValveCharacteristic {
    fn default() -> Self {
        Self {
            xk: -9.8027,
            yk: 125.49,
            max_flow_kgps: 0.1,
        }
    }
}

impl ValveCharacteristic {
    /// Create a characteristic, rejecting non-finite coefficients and a
    /// non-positive flow limit.
    pub fn new(xk: f64, yk: f64, max_flow_kgps: f64) -> ControlResult<Self> {
        if !(xk.is_finite() && yk.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "valve coefficients must be finite",
            });
        }
        let max_flow_kgps =
            ensure_positive(max_flow_kgps, "max flow").map_err(|_| ControlError::InvalidArg {
                what: "maximum valve flow must be positive",
            })?;
        Ok(Self {
            xk,
            yk,
            max_flow_kgps,
        })
    }

    /// Mass flow command (kg/s) for a sensed deviation (K).
    pub fn flow(&self, deviation_k: f64) -> f64 {
        if deviation_k <= 0.0 {
            return 0.0;
        }
        let kg_per_h = self.xk * deviation_k * deviation_k + self.yk * deviation_k;
        (kg_per_h / 3600.0).clamp(0.0, self.max_flow_kgps)
    }
}

/// Valve controller state carried between steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValveState {
    /// Deviation seen by the sensor after the lag (K)
    pub sensed_deviation_k: f64,
    /// Commanded mass flow (kg/s)
    pub mass_flow_kgps: f64,
}

/// Sensor lag followed by the flow characteristic.
///
/// # Example
///
/// ```
/// use hf_controls::{FirstOrderSensor, ThermostaticValve, ValveCharacteristic, ValveState};
///
/// let valve = ThermostaticValve::new(
///     20.0,
///     FirstOrderSensor::from_gain(500.0).unwrap(),
///     ValveCharacteristic::default(),
/// )
/// .unwrap();
///
/// let state = valve.update(&ValveState::default(), 21.0, 10.0);
/// assert_eq!(state.mass_flow_kgps, 0.0);
///
/// let state = valve.update(&state, 18.0, 10.0);
/// assert!(state.mass_flow_kgps > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermostaticValve {
    pub setpoint_c: f64,
    pub sensor: FirstOrderSensor,
    pub characteristic: ValveCharacteristic,
}

impl ThermostaticValve {
    pub fn new(
        setpoint_c: f64,
        sensor: FirstOrderSensor,
        characteristic: ValveCharacteristic,
    ) -> ControlResult<Self> {
        let setpoint_c = ensure_finite(setpoint_c, "setpoint").map_err(|_| ControlError::InvalidArg {
            what: "setpoint must be finite",
        })?;
        Ok(Self {
            setpoint_c,
            sensor,
            characteristic,
        })
    }

    /// State matching a room that has been at `room_c` for a long time.
    pub fn initial_state(&self, room_c: f64, mass_flow_kgps: f64) -> ValveState {
        ValveState {
            sensed_deviation_k: self.setpoint_c - room_c,
            mass_flow_kgps,
        }
    }

    /// React to a new room temperature.
    ///
    /// The returned flow is meant for the next radiator step.
    pub fn update(&self, state: &ValveState, room_c: f64, dt_s: f64) -> ValveState {
        let raw = self.setpoint_c - room_c;
        let sensed = self.sensor.sense(state.sensed_deviation_k, raw, dt_s);
        ValveState {
            sensed_deviation_k: sensed,
            mass_flow_kgps: self.characteristic.flow(sensed),
        }
    }
}
