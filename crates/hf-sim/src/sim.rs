//! Simulation runner and result recording.

use hf_core::units::{Time, s};
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::model::DiscreteModel;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds), must match the model's
    pub dt_s: f64,
    /// Number of time levels including the initial condition
    pub steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_s: 10.0,
            steps: 7500,
            record_every: 1,
        }
    }
}

impl SimOptions {
    /// Simulated time covered by the run.
    pub fn horizon(&self) -> Time {
        s(self.dt_s * self.steps.saturating_sub(1) as f64)
    }
}

/// Progress snapshot handed to the callback of [`run_sim_with_progress`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    pub step: usize,
    pub steps: usize,
    pub sim_time_s: f64,
}

impl SimProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.steps <= 1 {
            1.0
        } else {
            self.step as f64 / (self.steps - 1) as f64
        }
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Last recorded time and state.
    pub fn last(&self) -> Option<(f64, &S)> {
        Some((*self.t.last()?, self.x.last()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &S)> {
        self.t.iter().copied().zip(&self.x)
    }
}

/// Run a fixed number of steps, recording step 0 and every `record_every`-th
/// step after it. The final step is always recorded.
pub fn run_sim<M: DiscreteModel>(model: &mut M, opts: &SimOptions) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, opts, None)
}

/// Same as [`run_sim`] but reports progress roughly every percent.
pub fn run_sim_with_progress<M: DiscreteModel>(
    model: &mut M,
    opts: &SimOptions,
    mut progress_cb: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord<M::State>> {
    if !(opts.dt_s.is_finite() && opts.dt_s > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if (opts.dt_s - model.dt()).abs() > 1e-12 * opts.dt_s {
        return Err(SimError::InvalidArg {
            what: "dt differs from the model time step",
        });
    }
    if opts.steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    info!(dt_s = opts.dt_s, steps = opts.steps, "simulation started");

    let mut x = model.initial_state();
    let capacity = opts.steps.div_ceil(opts.record_every) + 1;
    let mut t_record = Vec::with_capacity(capacity);
    let mut x_record = Vec::with_capacity(capacity);
    t_record.push(0.0);
    x_record.push(x.clone());

    let report_every = (opts.steps / 100).max(1);
    let last = opts.steps - 1;
    for k in 1..opts.steps {
        x = model.step(k, &x)?;
        let t = k as f64 * opts.dt_s;

        if k % opts.record_every == 0 || k == last {
            t_record.push(t);
            x_record.push(x.clone());
        }

        if let Some(cb) = progress_cb.as_deref_mut()
            && (k % report_every == 0 || k == last)
        {
            cb(SimProgress {
                step: k,
                steps: opts.steps,
                sim_time_s: t,
            });
        }
    }

    info!(recorded = t_record.len(), "simulation finished");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
