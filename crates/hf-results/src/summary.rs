//! Aggregate figures for a finished run.

use hf_core::units::{Energy, Time, joules, s, to_hours, to_kwh};
use serde::{Deserialize, Serialize};

use crate::types::TimeseriesRecord;
use crate::{ResultsError, ResultsResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub record_count: usize,
    pub duration_h: f64,
    pub final_room_c: f64,
    pub min_room_c: f64,
    pub max_room_c: f64,
    pub peak_heat_output_w: f64,
    /// Delivered energy divided by the duration
    pub mean_heat_output_w: f64,
    pub delivered_energy_kwh: f64,
}

impl RunSummary {
    /// Summarize a run.
    ///
    /// The heat applied to the room between two records is the output held in
    /// the earlier record, so the energy sum is exact when every step is
    /// recorded and a left-rectangle estimate otherwise.
    pub fn from_records(records: &[TimeseriesRecord]) -> ResultsResult<Self> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(ResultsError::Empty { what: "no records" }),
        };

        let duration: Time = s(last.time_s - first.time_s);
        let energy: Energy = joules(
            records
                .windows(2)
                .map(|w| w[0].heat_output_w * (w[1].time_s - w[0].time_s))
                .sum(),
        );

        let rooms = records.iter().map(|r| r.room_temperature_c);
        let min_room_c = rooms.clone().fold(f64::INFINITY, f64::min);
        let max_room_c = rooms.fold(f64::NEG_INFINITY, f64::max);
        let peak_heat_output_w = records
            .iter()
            .map(|r| r.heat_output_w)
            .fold(f64::NEG_INFINITY, f64::max);

        let duration_s = last.time_s - first.time_s;
        let mean_heat_output_w = if duration_s > 0.0 {
            energy.value / duration_s
        } else {
            0.0
        };

        Ok(Self {
            record_count: records.len(),
            duration_h: to_hours(duration),
            final_room_c: last.room_temperature_c,
            min_room_c,
            max_room_c,
            peak_heat_output_w,
            mean_heat_output_w,
            delivered_energy_kwh: to_kwh(energy),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: f64, room: f64, q: f64) -> TimeseriesRecord {
        TimeseriesRecord {
            time_s: t,
            node_temperatures_c: vec![room],
            radiator_temperatures_c: vec![],
            room_temperature_c: room,
            heat_output_w: q,
            mass_flow_kgps: 0.0,
            sensed_deviation_k: None,
        }
    }

    #[test]
    fn constant_output_for_one_hour() {
        let records: Vec<_> = (0..=360)
            .map(|k| record(k as f64 * 10.0, 15.0 + k as f64 / 360.0, 1000.0))
            .collect();
        let summary = RunSummary::from_records(&records).unwrap();
        assert!((summary.duration_h - 1.0).abs() < 1e-12);
        assert!((summary.delivered_energy_kwh - 1.0).abs() < 1e-9);
        assert!((summary.mean_heat_output_w - 1000.0).abs() < 1e-9);
        assert_eq!(summary.min_room_c, 15.0);
        assert_eq!(summary.max_room_c, 16.0);
        assert_eq!(summary.final_room_c, 16.0);
        assert_eq!(summary.record_count, 361);
    }

    #[test]
    fn output_of_last_record_is_not_counted() {
        let records = vec![record(0.0, 20.0, 0.0), record(10.0, 20.0, 500.0)];
        let summary = RunSummary::from_records(&records).unwrap();
        assert_eq!(summary.delivered_energy_kwh, 0.0);
        assert_eq!(summary.peak_heat_output_w, 500.0);
    }

    #[test]
    fn empty_run_rejected() {
        assert!(matches!(
            RunSummary::from_records(&[]),
            Err(ResultsError::Empty { .. })
        ));
    }
}
