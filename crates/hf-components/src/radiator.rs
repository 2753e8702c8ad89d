//! Finite-volume panel radiator.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use hf_core::numeric::signed_pow;
use hf_core::units::{Power, w};
use tracing::debug;

/// Catalogue data and discretization of a water panel radiator.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiatorSpec {
    /// Nominal heat output at the nominal LMTD (W)
    pub nominal_output_w: f64,
    /// Nominal logarithmic mean temperature difference (K)
    pub nominal_lmtd_k: f64,
    /// Empirical radiator exponent
    pub exponent: f64,
    /// Water content (kg)
    pub water_mass_kg: f64,
    /// Metal mass of the unit (kg)
    pub metal_mass_kg: f64,
    pub water_cp_j_per_kg_k: f64,
    pub metal_cp_j_per_kg_k: f64,
    /// Number of finite volumes along the flow path
    pub segments: usize,
}

impl Default for RadiatorSpec {
    /// A 500 mm x 1000 mm double panel radiator split into five segments.
    fn default() -> Self {
        Self {
            nominal_output_w: 276.0,
            nominal_lmtd_k: 30.0,
            exponent: 1.286,
            water_mass_kg: 3.23,
            metal_mass_kg: 10.71,
            water_cp_j_per_kg_k: 4180.0,
            metal_cp_j_per_kg_k: 897.0,
            segments: 5,
        }
    }
}

/// Segment temperatures in flow order, inlet side first.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiatorState {
    pub segment_temperatures_c: Vec<f64>,
}

impl RadiatorState {
    /// Temperature of the last segment, i.e. the water leaving the radiator.
    pub fn return_temperature_c(&self) -> f64 {
        self.segment_temperatures_c.last().copied().unwrap_or(f64::NAN)
    }

    /// Arithmetic mean over the segments.
    pub fn mean_temperature_c(&self) -> f64 {
        let n = self.segment_temperatures_c.len();
        self.segment_temperatures_c.iter().sum::<f64>() / n as f64
    }
}

/// Result of one radiator step.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiatorStep {
    /// Segment temperatures at the new time level
    pub state: RadiatorState,
    /// Heat released by each segment, evaluated at the previous temperatures (W)
    pub segment_output_w: Vec<f64>,
    pub total_output_w: f64,
}

impl RadiatorStep {
    pub fn total_output(&self) -> Power {
        w(self.total_output_w)
    }
}

/// Radiator discretized into `n` equal segments along the water path.
///
/// ## Model
///
/// Each segment is a lumped water+metal mass exchanging heat with the water
/// arriving from upstream and with the room through the catalogue power law:
///
/// ```text
/// D_t = C_seg / Δt,  D_c = c_w · mF,  D_q = Q_n / n
/// x_i = (T_i(t-1) - T_room) / LMTD_n
/// T_i(t) = T_i(t-1) + (D_c/D_t)(T_{i-1}(t-1) - T_i(t-1)) - (D_q/D_t) spow(x_i, n_exp)
/// Q_i    = D_q · spow(x_i, n_exp)
/// ```
///
/// `T_0` is the inlet temperature. `spow` keeps the sign of its base, so a
/// radiator colder than the room draws heat instead of producing NaN.
#[derive(Debug, Clone)]
pub struct Radiator {
    spec: RadiatorSpec,
    dt_s: f64,
    /// Heat capacity of one segment (J/K)
    segment_capacitance: f64,
    /// Nominal output of one segment (W)
    segment_nominal_w: f64,
}

impl Radiator {
    /// Create a radiator for a fixed time step.
    ///
    /// # Errors
    /// Returns error if any physical parameter is non-positive or the time
    /// step is not a positive finite number.
    pub fn new(spec: RadiatorSpec, dt_s: f64) -> ComponentResult<Self> {
        check_positive(spec.nominal_output_w, "radiator nominal output")?;
        check_positive(spec.nominal_lmtd_k, "radiator nominal LMTD")?;
        check_positive(spec.exponent, "radiator exponent")?;
        check_positive(spec.water_mass_kg, "radiator water mass")?;
        check_finite(spec.metal_mass_kg, "radiator metal mass")?;
        if spec.metal_mass_kg < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "radiator metal mass cannot be negative",
            });
        }
        check_positive(spec.water_cp_j_per_kg_k, "water specific heat")?;
        check_positive(spec.metal_cp_j_per_kg_k, "metal specific heat")?;
        if spec.segments == 0 {
            return Err(ComponentError::InvalidArg {
                what: "radiator needs at least one segment",
            });
        }
        check_positive(dt_s, "time step")?;

        let n = spec.segments as f64;
        let segment_capacitance = (spec.water_mass_kg * spec.water_cp_j_per_kg_k
            + spec.metal_mass_kg * spec.metal_cp_j_per_kg_k)
            / n;
        let segment_nominal_w = spec.nominal_output_w / n;

        debug!(
            segments = spec.segments,
            segment_capacitance, segment_nominal_w, "radiator configured"
        );

        Ok(Self {
            spec,
            dt_s,
            segment_capacitance,
            segment_nominal_w,
        })
    }

    pub fn spec(&self) -> &RadiatorSpec {
        &self.spec
    }

    pub fn dt(&self) -> f64 {
        self.dt_s
    }

    pub fn segments(&self) -> usize {
        self.spec.segments
    }

    /// Heat capacity of one segment (J/K).
    pub fn segment_capacitance(&self) -> f64 {
        self.segment_capacitance
    }

    /// All segments at one temperature.
    pub fn initial_state(&self, temperature_c: f64) -> RadiatorState {
        RadiatorState {
            segment_temperatures_c: vec![temperature_c; self.spec.segments],
        }
    }

    /// Power-law output of one segment at `segment_c` facing `room_c` (W).
    pub fn segment_output(&self, segment_c: f64, room_c: f64) -> f64 {
        self.segment_nominal_w * self.excess_ratio(segment_c, room_c)
    }

    /// Total output if every segment sat at the temperatures in `state` (W).
    pub fn heat_output(&self, state: &RadiatorState, room_c: f64) -> f64 {
        state
            .segment_temperatures_c
            .iter()
            .map(|&t| self.segment_output(t, room_c))
            .sum()
    }

    fn excess_ratio(&self, segment_c: f64, room_c: f64) -> f64 {
        signed_pow((segment_c - room_c) / self.spec.nominal_lmtd_k, self.spec.exponent)
    }

    /// Advance all segments by one time step.
    ///
    /// Every segment reads only previous-step values: its own temperature and
    /// that of its upstream neighbour (or `inlet_c` for the first segment).
    /// `room_c` is the sink temperature the caller has already advanced.
    /// A zero `mass_flow_kgps` leaves only the exchange with the room.
    pub fn step(
        &self,
        state: &RadiatorState,
        inlet_c: f64,
        mass_flow_kgps: f64,
        room_c: f64,
    ) -> RadiatorStep {
        let prev = &state.segment_temperatures_c;
        let d_t = self.segment_capacitance / self.dt_s;
        let d_c = self.spec.water_cp_j_per_kg_k * mass_flow_kgps;

        let mut next = Vec::with_capacity(prev.len());
        let mut segment_output_w = Vec::with_capacity(prev.len());
        let mut upstream = inlet_c;
        for &t in prev {
            let q = self.segment_output(t, room_c);
            next.push(t + d_c / d_t * (upstream - t) - q / d_t);
            segment_output_w.push(q);
            upstream = t;
        }

        let total_output_w = segment_output_w.iter().sum();
        RadiatorStep {
            state: RadiatorState {
                segment_temperatures_c: next,
            },
            segment_output_w,
            total_output_w,
        }
    }
}
