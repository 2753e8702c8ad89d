//! Scenario to model compilation.

use hf_components::{Radiator, RadiatorSpec};
use hf_controls::{FirstOrderSensor, ThermostaticValve, ValveCharacteristic};
use hf_core::NodeId;
use hf_network::{Layer, ThermalNetwork, ThermalNetworkBuilder, Wall};
use hf_project::{HeatingDef, Scenario, validate_scenario};
use hf_sim::{CoupledModel, ExplicitUpdater, HeatingLoop, SimOptions};
use tracing::{debug, warn};

use crate::error::AppResult;

/// Name of the room air node in every compiled network.
pub const ROOM_NODE: &str = "room air";
/// Name of the outdoor boundary in every compiled network.
pub const OUTDOOR_BOUNDARY: &str = "outdoor";

/// A scenario ready to be stepped.
#[derive(Debug, Clone)]
pub struct CompiledScenario {
    pub model: CoupledModel,
    pub options: SimOptions,
    pub network: ThermalNetwork,
    /// Envelope node names in state order, room first
    pub node_names: Vec<String>,
}

impl CompiledScenario {
    pub fn room(&self) -> NodeId {
        self.model.room()
    }
}

/// Validate `scenario` and assemble the envelope network and heating loop.
///
/// A time step beyond the explicit stability limit is reported with a
/// warning but still compiled.
pub fn compile_scenario(scenario: &Scenario) -> AppResult<CompiledScenario> {
    validate_scenario(scenario)?;

    let dt_s = scenario.simulation.dt_s;
    let envelope = &scenario.envelope;
    let area_m2 = envelope
        .area_m2
        .unwrap_or_else(|| scenario.room.facade_area_m2());

    let mut builder = ThermalNetworkBuilder::new();
    let room = builder.add_node(ROOM_NODE, scenario.room.air_capacitance());
    let outdoor = builder.add_boundary(OUTDOOR_BOUNDARY, scenario.boundary.outdoor_c);

    let wall = envelope.layers.iter().fold(
        Wall::new(area_m2, envelope.h_in_w_per_m2_k, envelope.h_out_w_per_m2_k),
        |wall, def| {
            wall.with_layer(
                Layer::new(
                    def.name.clone(),
                    def.thickness_m,
                    def.conductivity_w_per_m_k,
                    def.density_kg_per_m3,
                    def.specific_heat_j_per_kg_k,
                )
                .with_subdivisions(def.subdivisions),
            )
        },
    );
    let wall_nodes = builder.add_wall(room, &wall, outdoor)?;
    let network = builder.build()?;

    let updater = ExplicitUpdater::new(&network, dt_s)?;
    if updater.min_diagonal() < 0.0 {
        warn!(
            dt_s,
            max_stable_dt_s = ExplicitUpdater::max_stable_dt(&network),
            "time step exceeds the explicit stability limit"
        );
    }

    let wall_c = scenario.initial.wall_c.unwrap_or(scenario.initial.indoor_c);
    let mut initial = vec![wall_c; network.len()];
    initial[room.slot()] = scenario.initial.indoor_c;

    let mut model = CoupledModel::new(updater, room, initial)?;
    if let Some(heating) = &scenario.heating {
        model = model.with_heating(heating_loop(heating, scenario.initial.indoor_c, dt_s)?)?;
    }

    debug!(
        scenario = %scenario.name,
        nodes = network.len(),
        wall_nodes = wall_nodes.len(),
        u_value = wall.u_value(),
        heated = scenario.heating.is_some(),
        "scenario compiled"
    );

    Ok(CompiledScenario {
        model,
        options: SimOptions {
            dt_s,
            steps: scenario.simulation.steps,
            record_every: scenario.simulation.record_every,
        },
        node_names: network.node_names(),
        network,
    })
}

fn heating_loop(def: &HeatingDef, indoor_c: f64, dt_s: f64) -> AppResult<HeatingLoop> {
    let r = &def.radiator;
    let radiator = Radiator::new(
        RadiatorSpec {
            nominal_output_w: r.nominal_output_w,
            nominal_lmtd_k: r.nominal_lmtd_k,
            exponent: r.exponent,
            water_mass_kg: r.water_mass_kg,
            metal_mass_kg: r.metal_mass_kg,
            water_cp_j_per_kg_k: r.water_cp_j_per_kg_k,
            metal_cp_j_per_kg_k: r.metal_cp_j_per_kg_k,
            segments: r.segments,
        },
        dt_s,
    )?;

    let valve = match &def.valve {
        Some(v) => Some(ThermostaticValve::new(
            v.setpoint_c,
            FirstOrderSensor::from_gain(v.sensor_gain_per_s)?,
            ValveCharacteristic::new(v.xk, v.yk, v.max_flow_kgps)?,
        )?),
        None => None,
    };

    Ok(HeatingLoop {
        radiator,
        supply_c: def.supply_c,
        valve,
        initial_radiator_c: indoor_c + def.initial_offset_k,
        initial_mass_flow_kgps: def.initial_mass_flow_kgps,
        initial_heat_output_w: def.initial_heat_output_w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_project::presets;
    use hf_sim::DiscreteModel;

    #[test]
    fn single_layer_preset_compiles_to_four_nodes() {
        let compiled = compile_scenario(&presets::single_layer_wall_with_radiator()).unwrap();
        assert_eq!(
            compiled.node_names,
            vec!["room air", "brick[0]", "brick[1]", "brick[2]"]
        );
        let x0 = compiled.model.initial_state();
        assert_eq!(x0.envelope, vec![15.0; 4]);
        let radiator = x0.radiator.unwrap();
        assert_eq!(radiator.segment_temperatures_c, vec![17.0; 5]);
        assert_eq!(x0.coupling.heat_output_w, 10.0);
        assert!(x0.valve.is_some());
    }

    #[test]
    fn multi_layer_preset_is_unheated() {
        let compiled = compile_scenario(&presets::multi_layer_wall()).unwrap();
        assert_eq!(compiled.network.len(), 7);
        assert!(compiled.model.heating().is_none());
        assert_eq!(compiled.options.steps, 7500);
    }

    #[test]
    fn wall_temperature_overrides_indoor() {
        let mut scenario = presets::multi_layer_wall();
        scenario.initial.wall_c = Some(5.0);
        let compiled = compile_scenario(&scenario).unwrap();
        let x0 = compiled.model.initial_state();
        assert_eq!(x0.envelope[0], 20.0);
        assert!(x0.envelope[1..].iter().all(|&t| t == 5.0));
    }

    #[test]
    fn explicit_area_replaces_facade() {
        let mut scenario = presets::multi_layer_wall();
        scenario.envelope.area_m2 = Some(30.0);
        let small = compile_scenario(&presets::multi_layer_wall()).unwrap();
        let large = compile_scenario(&scenario).unwrap();
        let room = small.room();
        let wall = NodeId::from_index(1);
        let r_small = small.network.resistance_between(room, wall).unwrap();
        let r_large = large.network.resistance_between(room, wall).unwrap();
        assert!((r_small / r_large - 2.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_scenario_is_rejected() {
        let mut scenario = presets::multi_layer_wall();
        scenario.simulation.dt_s = -1.0;
        assert!(matches!(
            compile_scenario(&scenario),
            Err(crate::AppError::Validation(_))
        ));
    }

    #[test]
    fn unstable_step_still_compiles() {
        let mut scenario = presets::multi_layer_wall();
        scenario.simulation.dt_s = 5000.0;
        let compiled = compile_scenario(&scenario).unwrap();
        assert!(compiled.model.updater().min_diagonal() < 0.0);
    }
}
