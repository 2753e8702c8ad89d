//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub dt_s: f64,
    pub steps: usize,
    pub record_every: usize,
    /// Envelope node names in column order
    pub node_names: Vec<String>,
    #[serde(default)]
    pub radiator_segments: usize,
    #[serde(default)]
    pub has_valve: bool,
}

/// One recorded time level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub node_temperatures_c: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radiator_temperatures_c: Vec<f64>,
    pub room_temperature_c: f64,
    /// Aggregate radiator output feeding the next envelope step
    pub heat_output_w: f64,
    /// Flow command feeding the next radiator step
    pub mass_flow_kgps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensed_deviation_k: Option<f64>,
}

/// Turn a display name into a column-safe identifier.
pub fn column_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
