//! Scenario schema definitions.
//!
//! Units are part of every field name. Temperatures are in °C, temperature
//! differences in K.

use hf_core::units::{Time, s};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub simulation: SimulationDef,
    pub room: RoomDef,
    pub envelope: EnvelopeDef,
    pub boundary: BoundaryDef,
    pub initial: InitialDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating: Option<HeatingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    pub dt_s: f64,
    /// Number of time levels, the initial condition included
    pub steps: usize,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
}

impl SimulationDef {
    /// Simulated time from the initial condition to the last step.
    pub fn horizon(&self) -> Time {
        s(self.dt_s * self.steps.saturating_sub(1) as f64)
    }
}

fn default_record_every() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDef {
    pub height_m: f64,
    pub width_m: f64,
    pub depth_m: f64,
    #[serde(default)]
    pub air: AirDef,
}

impl RoomDef {
    pub fn volume_m3(&self) -> f64 {
        self.height_m * self.width_m * self.depth_m
    }

    /// Area of the height × width face.
    pub fn facade_area_m2(&self) -> f64 {
        self.height_m * self.width_m
    }

    /// Heat capacity of the room air (J/K).
    pub fn air_capacitance(&self) -> f64 {
        self.air.density_kg_per_m3 * self.air.specific_heat_j_per_kg_k * self.volume_m3()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirDef {
    pub density_kg_per_m3: f64,
    pub specific_heat_j_per_kg_k: f64,
}

impl Default for AirDef {
    /// Air at 20 °C.
    fn default() -> Self {
        Self {
            density_kg_per_m3: 1.204,
            specific_heat_j_per_kg_k: 1006.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeDef {
    /// Wall area; defaults to the room's height × width face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    pub h_in_w_per_m2_k: f64,
    pub h_out_w_per_m2_k: f64,
    /// Ordered from the room side outwards
    pub layers: Vec<LayerDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerDef {
    pub name: String,
    pub thickness_m: f64,
    pub conductivity_w_per_m_k: f64,
    pub density_kg_per_m3: f64,
    pub specific_heat_j_per_kg_k: f64,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
}

fn default_subdivisions() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub outdoor_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialDef {
    pub indoor_c: f64,
    /// Initial wall temperature; defaults to `indoor_c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_c: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatingDef {
    /// Radiator inlet temperature
    pub supply_c: f64,
    pub radiator: RadiatorDef,
    /// Radiator starts this far above the initial indoor temperature
    #[serde(default)]
    pub initial_offset_k: f64,
    pub initial_mass_flow_kgps: f64,
    #[serde(default)]
    pub initial_heat_output_w: f64,
    /// Without a valve the mass flow stays at its initial value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valve: Option<ValveDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadiatorDef {
    pub nominal_output_w: f64,
    pub nominal_lmtd_k: f64,
    pub exponent: f64,
    pub water_mass_kg: f64,
    pub metal_mass_kg: f64,
    #[serde(default = "default_water_cp")]
    pub water_cp_j_per_kg_k: f64,
    #[serde(default = "default_metal_cp")]
    pub metal_cp_j_per_kg_k: f64,
    pub segments: usize,
}

fn default_water_cp() -> f64 {
    4180.0
}

fn default_metal_cp() -> f64 {
    897.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValveDef {
    pub setpoint_c: f64,
    /// Sensor gain K, the time constant is 1/K
    pub sensor_gain_per_s: f64,
    pub xk: f64,
    pub yk: f64,
    pub max_flow_kgps: f64,
}
