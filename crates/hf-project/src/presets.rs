//! Reference scenarios.
//!
//! Both describe a 3 m × 5 m × 4 m room losing heat through one 15 m² wall to
//! 2 °C outdoor air, stepped at 10 s for 7500 time levels.

use crate::schema::*;

fn room() -> RoomDef {
    RoomDef {
        height_m: 3.0,
        width_m: 5.0,
        depth_m: 4.0,
        air: AirDef::default(),
    }
}

fn simulation() -> SimulationDef {
    SimulationDef {
        dt_s: 10.0,
        steps: 7500,
        record_every: 1,
    }
}

fn layer(name: &str, thickness_m: f64, k: f64, rho: f64, cp: f64, subdivisions: usize) -> LayerDef {
    LayerDef {
        name: name.to_string(),
        thickness_m,
        conductivity_w_per_m_k: k,
        density_kg_per_m3: rho,
        specific_heat_j_per_kg_k: cp,
        subdivisions,
    }
}

/// 30 cm brick wall resolved by three surface/mid-plane nodes, heated by a
/// five-segment panel radiator behind a thermostatic valve.
pub fn single_layer_wall_with_radiator() -> Scenario {
    Scenario {
        version: crate::LATEST_VERSION,
        name: "single-layer wall with radiator".to_string(),
        simulation: simulation(),
        room: room(),
        envelope: EnvelopeDef {
            area_m2: None,
            h_in_w_per_m2_k: 7.7,
            h_out_w_per_m2_k: 25.0,
            layers: vec![layer("brick", 0.3, 0.811, 1820.0, 880.0, 3)],
        },
        boundary: BoundaryDef { outdoor_c: 2.0 },
        initial: InitialDef {
            indoor_c: 15.0,
            wall_c: None,
        },
        heating: Some(HeatingDef {
            supply_c: 90.0,
            radiator: RadiatorDef {
                nominal_output_w: 276.0,
                nominal_lmtd_k: 30.0,
                exponent: 1.286,
                water_mass_kg: 3.23,
                metal_mass_kg: 10.71,
                water_cp_j_per_kg_k: 4180.0,
                metal_cp_j_per_kg_k: 897.0,
                segments: 5,
            },
            initial_offset_k: 2.0,
            initial_mass_flow_kgps: 0.1,
            initial_heat_output_w: 10.0,
            valve: Some(ValveDef {
                setpoint_c: 20.0,
                sensor_gain_per_s: 500.0,
                xk: -9.8027,
                yk: 125.49,
                max_flow_kgps: 0.1,
            }),
        }),
    }
}

/// Plastered brick wall with EPS insulation, unheated.
pub fn multi_layer_wall() -> Scenario {
    Scenario {
        version: crate::LATEST_VERSION,
        name: "multi-layer wall".to_string(),
        simulation: simulation(),
        room: room(),
        envelope: EnvelopeDef {
            area_m2: None,
            h_in_w_per_m2_k: 7.7,
            h_out_w_per_m2_k: 25.0,
            layers: vec![
                layer("interior plaster", 0.03, 0.721, 1762.0, 840.0, 1),
                layer("brick", 0.19, 0.811, 1820.0, 880.0, 3),
                layer("insulation", 0.06, 0.035, 24.0, 1340.0, 1),
                layer("exterior plaster", 0.02, 0.721, 1762.0, 840.0, 1),
            ],
        },
        boundary: BoundaryDef { outdoor_c: 2.0 },
        initial: InitialDef {
            indoor_c: 20.0,
            wall_c: None,
        },
        heating: None,
    }
}

/// Look up a preset by its command-line name.
pub fn by_name(name: &str) -> Option<Scenario> {
    match name {
        "single-layer" => Some(single_layer_wall_with_radiator()),
        "multi-layer" => Some(multi_layer_wall()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 2] = ["single-layer", "multi-layer"];
