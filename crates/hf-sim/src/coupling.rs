//! Values exchanged between the envelope, the radiator and the valve.

/// Coupling variables carried from one step to the next.
///
/// Each field is written by exactly one subsystem and read by another during
/// the *following* step, so every consumer works with a value that is one
/// step stale:
///
/// | field                | produced by | consumed next step by |
/// |----------------------|-------------|-----------------------|
/// | `room_temperature_c` | envelope    | (reporting only)      |
/// | `heat_output_w`      | radiator    | envelope heat input   |
/// | `mass_flow_kgps`     | valve       | radiator              |
///
/// Within a step the radiator and valve read the room temperature the
/// envelope has just produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coupling {
    /// Room-air temperature after the latest envelope update (°C)
    pub room_temperature_c: f64,
    /// Aggregate radiator output injected at the room node next step (W)
    pub heat_output_w: f64,
    /// Mass flow the radiator will see next step (kg/s)
    pub mass_flow_kgps: f64,
}
