//! Scenario validation logic.

use crate::schema::{HeatingDef, LayerDef, Scenario};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing section: {what}")]
    Missing { what: &'static str },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn non_negative(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

fn finite(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn at_least_one(field: &str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Check every value a scenario needs before it can be compiled.
///
/// The explicit stability limit on `dt_s` is not checked here since it
/// depends on the assembled network.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let sim = &scenario.simulation;
    positive("simulation.dt_s", sim.dt_s)?;
    at_least_one("simulation.steps", sim.steps)?;
    at_least_one("simulation.record_every", sim.record_every)?;

    let room = &scenario.room;
    positive("room.height_m", room.height_m)?;
    positive("room.width_m", room.width_m)?;
    positive("room.depth_m", room.depth_m)?;
    positive("room.air.density_kg_per_m3", room.air.density_kg_per_m3)?;
    positive("room.air.specific_heat_j_per_kg_k", room.air.specific_heat_j_per_kg_k)?;

    let envelope = &scenario.envelope;
    if let Some(area) = envelope.area_m2 {
        positive("envelope.area_m2", area)?;
    }
    positive("envelope.h_in_w_per_m2_k", envelope.h_in_w_per_m2_k)?;
    positive("envelope.h_out_w_per_m2_k", envelope.h_out_w_per_m2_k)?;
    if envelope.layers.is_empty() {
        return Err(ValidationError::Missing {
            what: "envelope.layers",
        });
    }
    for pair in envelope.layers.windows(2) {
        if pair[0].subdivisions > 1 && pair[1].subdivisions > 1 {
            return Err(ValidationError::InvalidValue {
                field: format!("layer '{}' subdivisions", pair[1].name),
                value: pair[1].subdivisions.to_string(),
                reason: format!(
                    "cannot follow subdivided layer '{}'; one of the two must use a single node",
                    pair[0].name
                ),
            });
        }
    }
    let mut layer_names = HashSet::new();
    for layer in &envelope.layers {
        if !layer_names.insert(&layer.name) {
            return Err(ValidationError::DuplicateId {
                id: layer.name.clone(),
                context: "envelope.layers".to_string(),
            });
        }
        validate_layer(layer)?;
    }

    finite("boundary.outdoor_c", scenario.boundary.outdoor_c)?;
    finite("initial.indoor_c", scenario.initial.indoor_c)?;
    if let Some(wall_c) = scenario.initial.wall_c {
        finite("initial.wall_c", wall_c)?;
    }

    if let Some(heating) = &scenario.heating {
        validate_heating(heating)?;
    }

    Ok(())
}

fn validate_layer(layer: &LayerDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("layer '{}' {}", layer.name, name);
    positive(field("thickness_m"), layer.thickness_m)?;
    positive(field("conductivity_w_per_m_k"), layer.conductivity_w_per_m_k)?;
    positive(field("density_kg_per_m3"), layer.density_kg_per_m3)?;
    positive(field("specific_heat_j_per_kg_k"), layer.specific_heat_j_per_kg_k)?;
    at_least_one(&field("subdivisions"), layer.subdivisions)
}

fn validate_heating(heating: &HeatingDef) -> Result<(), ValidationError> {
    finite("heating.supply_c", heating.supply_c)?;
    finite("heating.initial_offset_k", heating.initial_offset_k)?;
    non_negative("heating.initial_mass_flow_kgps", heating.initial_mass_flow_kgps)?;
    finite("heating.initial_heat_output_w", heating.initial_heat_output_w)?;

    let r = &heating.radiator;
    positive("heating.radiator.nominal_output_w", r.nominal_output_w)?;
    positive("heating.radiator.nominal_lmtd_k", r.nominal_lmtd_k)?;
    positive("heating.radiator.exponent", r.exponent)?;
    positive("heating.radiator.water_mass_kg", r.water_mass_kg)?;
    non_negative("heating.radiator.metal_mass_kg", r.metal_mass_kg)?;
    positive("heating.radiator.water_cp_j_per_kg_k", r.water_cp_j_per_kg_k)?;
    positive("heating.radiator.metal_cp_j_per_kg_k", r.metal_cp_j_per_kg_k)?;
    at_least_one("heating.radiator.segments", r.segments)?;

    if let Some(valve) = &heating.valve {
        finite("heating.valve.setpoint_c", valve.setpoint_c)?;
        positive("heating.valve.sensor_gain_per_s", valve.sensor_gain_per_s)?;
        finite("heating.valve.xk", valve.xk)?;
        finite("heating.valve.yk", valve.yk)?;
        positive("heating.valve.max_flow_kgps", valve.max_flow_kgps)?;
        if heating.initial_mass_flow_kgps > valve.max_flow_kgps {
            return Err(ValidationError::InvalidValue {
                field: "heating.initial_mass_flow_kgps".to_string(),
                value: heating.initial_mass_flow_kgps.to_string(),
                reason: format!("exceeds the valve's maximum flow of {} kg/s", valve.max_flow_kgps),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn presets_are_valid() {
        validate_scenario(&presets::single_layer_wall_with_radiator()).unwrap();
        validate_scenario(&presets::multi_layer_wall()).unwrap();
    }

    #[test]
    fn zero_thickness_rejected() {
        let mut s = presets::multi_layer_wall();
        s.envelope.layers[0].thickness_m = 0.0;
        let err = validate_scenario(&s).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field.contains("thickness_m")));
    }

    #[test]
    fn empty_layers_rejected() {
        let mut s = presets::multi_layer_wall();
        s.envelope.layers.clear();
        assert_eq!(
            validate_scenario(&s),
            Err(ValidationError::Missing {
                what: "envelope.layers"
            })
        );
    }

    #[test]
    fn duplicate_layer_rejected() {
        let mut s = presets::multi_layer_wall();
        let dup = s.envelope.layers[0].clone();
        s.envelope.layers.push(dup);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn bad_time_settings_rejected() {
        let mut s = presets::multi_layer_wall();
        s.simulation.dt_s = -1.0;
        assert!(validate_scenario(&s).is_err());

        let mut s = presets::multi_layer_wall();
        s.simulation.steps = 0;
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn bad_valve_rejected() {
        let mut s = presets::single_layer_wall_with_radiator();
        if let Some(valve) = s.heating.as_mut().and_then(|h| h.valve.as_mut()) {
            valve.max_flow_kgps = 0.0;
        }
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn initial_flow_above_valve_limit_rejected() {
        let mut s = presets::single_layer_wall_with_radiator();
        if let Some(heating) = s.heating.as_mut() {
            heating.initial_mass_flow_kgps = 0.5;
        }
        match validate_scenario(&s) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "heating.initial_mass_flow_kgps")
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }

        // Without a valve the flow has no upper bound to respect.
        if let Some(heating) = s.heating.as_mut() {
            heating.valve = None;
        }
        assert!(validate_scenario(&s).is_ok());
    }

    #[test]
    fn adjacent_subdivided_layers_rejected() {
        let mut s = presets::multi_layer_wall();
        s.envelope.layers[2].subdivisions = 2;
        match validate_scenario(&s) {
            Err(ValidationError::InvalidValue { field, reason, .. }) => {
                assert!(field.contains("insulation"));
                assert!(reason.contains("brick"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn future_version_rejected() {
        let mut s = presets::multi_layer_wall();
        s.version = crate::LATEST_VERSION + 1;
        assert_eq!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion {
                version: crate::LATEST_VERSION + 1
            })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn non_positive_conductivity_always_rejected(k in -10.0f64..=0.0) {
                let mut s = presets::multi_layer_wall();
                s.envelope.layers[2].conductivity_w_per_m_k = k;
                prop_assert!(validate_scenario(&s).is_err());
            }

            #[test]
            fn any_positive_layer_accepted(
                thickness in 0.001f64..1.0,
                k in 0.01f64..5.0,
                rho in 10.0f64..3000.0,
                cp in 100.0f64..2000.0,
                subdivisions in 1usize..6,
            ) {
                let mut s = presets::multi_layer_wall();
                let layer = &mut s.envelope.layers[1];
                layer.thickness_m = thickness;
                layer.conductivity_w_per_m_k = k;
                layer.density_kg_per_m3 = rho;
                layer.specific_heat_j_per_kg_k = cp;
                layer.subdivisions = subdivisions;
                prop_assert!(validate_scenario(&s).is_ok());
            }
        }
    }
}
