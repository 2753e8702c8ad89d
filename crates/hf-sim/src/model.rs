//! Discrete-time models and the coupled envelope/heating model.

use hf_components::{Radiator, RadiatorState};
use hf_controls::{ThermostaticValve, ValveState};
use hf_core::NodeId;
use tracing::{debug, trace};

use crate::coupling::Coupling;
use crate::error::{SimError, SimResult};
use crate::explicit::{ExplicitUpdater, HeatInput};

/// Trait for fixed-step discrete-time models.
///
/// A DiscreteModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state at step 0
/// - A step map `x(k) = f(k, x(k-1))`
pub trait DiscreteModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Time step baked into the model (seconds).
    fn dt(&self) -> f64;

    /// Return the state at step 0.
    fn initial_state(&self) -> Self::State;

    /// Compute the state at step `k` from the state at step `k - 1`.
    fn step(&mut self, k: usize, x: &Self::State) -> SimResult<Self::State>;
}

/// Radiator loop attached to the room node.
#[derive(Debug, Clone)]
pub struct HeatingLoop {
    pub radiator: Radiator,
    /// Radiator inlet temperature, held constant (°C)
    pub supply_c: f64,
    /// Without a valve the mass flow stays at `initial_mass_flow_kgps`.
    pub valve: Option<ThermostaticValve>,
    /// Initial temperature of every radiator segment (°C)
    pub initial_radiator_c: f64,
    pub initial_mass_flow_kgps: f64,
    /// Heat output applied to the room during the first step (W)
    pub initial_heat_output_w: f64,
}

/// Snapshot of the coupled model after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct CoupledState {
    /// Envelope node temperatures in node order (°C)
    pub envelope: Vec<f64>,
    pub radiator: Option<RadiatorState>,
    pub valve: Option<ValveState>,
    pub coupling: Coupling,
}

/// Building envelope coupled to an optional radiator loop.
///
/// Each step runs strictly in this order:
/// 1. advance the envelope with the previous step's radiator output at the
///    room node
/// 2. advance the radiator against the new room temperature using the
///    previous step's mass flow
/// 3. sum the segment outputs for the next envelope step
/// 4. let the valve react to the new room temperature; its flow is used by
///    the next radiator step
#[derive(Debug, Clone)]
pub struct CoupledModel {
    updater: ExplicitUpdater,
    room: NodeId,
    initial_envelope_c: Vec<f64>,
    heating: Option<HeatingLoop>,
}

impl CoupledModel {
    /// Envelope-only model.
    ///
    /// # Errors
    /// Returns error if `room` is not a node of the network or the initial
    /// temperatures do not cover every node.
    pub fn new(updater: ExplicitUpdater, room: NodeId, initial_envelope_c: Vec<f64>) -> SimResult<Self> {
        if room.slot() >= updater.len() {
            return Err(SimError::InvalidArg {
                what: "room node is not part of the network",
            });
        }
        if initial_envelope_c.len() != updater.len() {
            return Err(SimError::InvalidArg {
                what: "initial temperatures must cover every node",
            });
        }
        if initial_envelope_c.iter().any(|t| !t.is_finite()) {
            return Err(SimError::NonPhysical {
                what: "initial temperatures must be finite",
            });
        }
        Ok(Self {
            updater,
            room,
            initial_envelope_c,
            heating: None,
        })
    }

    /// Attach a radiator loop at the room node.
    pub fn with_heating(mut self, heating: HeatingLoop) -> SimResult<Self> {
        let dt = self.updater.dt();
        if (heating.radiator.dt() - dt).abs() > 1e-12 * dt {
            return Err(SimError::InvalidArg {
                what: "radiator and envelope must share the time step",
            });
        }
        if !(heating.supply_c.is_finite()
            && heating.initial_radiator_c.is_finite()
            && heating.initial_heat_output_w.is_finite())
        {
            return Err(SimError::NonPhysical {
                what: "heating loop temperatures and output must be finite",
            });
        }
        if !(heating.initial_mass_flow_kgps.is_finite() && heating.initial_mass_flow_kgps >= 0.0) {
            return Err(SimError::NonPhysical {
                what: "initial mass flow must be non-negative",
            });
        }
        if let Some(valve) = &heating.valve
            && heating.initial_mass_flow_kgps > valve.characteristic.max_flow_kgps
        {
            return Err(SimError::InvalidArg {
                what: "initial mass flow exceeds the valve's maximum flow",
            });
        }
        debug!(
            segments = heating.radiator.segments(),
            supply_c = heating.supply_c,
            valve = heating.valve.is_some(),
            "heating loop attached"
        );
        self.heating = Some(heating);
        Ok(self)
    }

    pub fn updater(&self) -> &ExplicitUpdater {
        &self.updater
    }

    pub fn updater_mut(&mut self) -> &mut ExplicitUpdater {
        &mut self.updater
    }

    pub fn room(&self) -> NodeId {
        self.room
    }

    pub fn heating(&self) -> Option<&HeatingLoop> {
        self.heating.as_ref()
    }
}

impl DiscreteModel for CoupledModel {
    type State = CoupledState;

    fn dt(&self) -> f64 {
        self.updater.dt()
    }

    fn initial_state(&self) -> CoupledState {
        let room_c = self.initial_envelope_c[self.room.slot()];
        match &self.heating {
            Some(h) => CoupledState {
                envelope: self.initial_envelope_c.clone(),
                radiator: Some(h.radiator.initial_state(h.initial_radiator_c)),
                valve: h
                    .valve
                    .as_ref()
                    .map(|v| v.initial_state(room_c, h.initial_mass_flow_kgps)),
                coupling: Coupling {
                    room_temperature_c: room_c,
                    heat_output_w: h.initial_heat_output_w,
                    mass_flow_kgps: h.initial_mass_flow_kgps,
                },
            },
            None => CoupledState {
                envelope: self.initial_envelope_c.clone(),
                radiator: None,
                valve: None,
                coupling: Coupling {
                    room_temperature_c: room_c,
                    ..Coupling::default()
                },
            },
        }
    }

    fn step(&mut self, k: usize, x: &CoupledState) -> SimResult<CoupledState> {
        let inputs = [HeatInput {
            node: self.room,
            power_w: x.coupling.heat_output_w,
        }];
        let b = self.updater.forcing(&inputs)?;
        let envelope = self.updater.advance(&x.envelope, &b);
        let room_c = envelope[self.room.slot()];

        let Some(heating) = &self.heating else {
            trace!(k, room_c, "step");
            return Ok(CoupledState {
                envelope,
                radiator: None,
                valve: None,
                coupling: Coupling {
                    room_temperature_c: room_c,
                    ..Coupling::default()
                },
            });
        };

        let prev_radiator = x.radiator.as_ref().ok_or(SimError::InvalidArg {
            what: "state is missing the radiator",
        })?;
        let radiator_step = heating.radiator.step(
            prev_radiator,
            heating.supply_c,
            x.coupling.mass_flow_kgps,
            room_c,
        );

        let valve = match (&heating.valve, &x.valve) {
            (Some(valve), Some(prev)) => Some(valve.update(prev, room_c, self.updater.dt())),
            (Some(_), None) => {
                return Err(SimError::InvalidArg {
                    what: "state is missing the valve",
                });
            }
            (None, _) => None,
        };
        let mass_flow_kgps = valve
            .as_ref()
            .map_or(x.coupling.mass_flow_kgps, |v| v.mass_flow_kgps);

        trace!(
            k,
            room_c,
            heat_output_w = radiator_step.total_output_w,
            mass_flow_kgps,
            "step"
        );

        Ok(CoupledState {
            envelope,
            radiator: Some(radiator_step.state),
            valve,
            coupling: Coupling {
                room_temperature_c: room_c,
                heat_output_w: radiator_step.total_output_w,
                mass_flow_kgps,
            },
        })
    }
}
