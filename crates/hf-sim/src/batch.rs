//! Parallel execution of independent scenarios.
//!
//! Each model owns its full state, so scenarios run on separate rayon
//! workers without sharing anything. The time axis of one scenario is never
//! split.

use rayon::prelude::*;
use tracing::debug;

use crate::error::SimResult;
use crate::model::DiscreteModel;
use crate::sim::{SimOptions, SimRecord, run_sim};

/// Run every `(model, options)` pair, returning results in input order.
pub fn run_batch<M>(jobs: Vec<(M, SimOptions)>) -> Vec<SimResult<SimRecord<M::State>>>
where
    M: DiscreteModel + Send,
    M::State: Send,
{
    debug!(jobs = jobs.len(), "batch started");
    jobs.into_par_iter()
        .map(|(mut model, opts)| run_sim(&mut model, &opts))
        .collect()
}
