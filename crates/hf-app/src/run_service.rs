//! Run service: compile, simulate, summarize and optionally persist.

use std::path::{Path, PathBuf};
use std::time::Instant;

use hf_project::Scenario;
use hf_results::{RunManifest, RunStore, RunSummary, TimeseriesRecord};
use hf_sim::{CoupledState, SimProgress, SimRecord, run_sim_with_progress};
use tracing::info;

use crate::compile::{CompiledScenario, compile_scenario};
use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage, SimulationProgress};

/// Request to run one scenario.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub scenario: &'a Scenario,
    /// Run store root; nothing is written when `None`
    pub output_dir: Option<&'a Path>,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub summarize_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
    pub steps: usize,
}

/// Response from a run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub manifest: RunManifest,
    pub records: Vec<TimeseriesRecord>,
    pub summary: RunSummary,
    /// Run directory when the results were saved
    pub saved_to: Option<PathBuf>,
    pub timing: RunTimingSummary,
}

impl RunResponse {
    pub fn run_id(&self) -> &str {
        &self.manifest.run_id
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    scenario: &str,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    simulation: Option<SimulationProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            scenario: scenario.to_string(),
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            simulation,
        });
    }
}

/// Run a scenario without progress reporting.
pub fn run_scenario(request: &RunRequest) -> AppResult<RunResponse> {
    run_scenario_with_progress(request, None)
}

/// Run a scenario, reporting each stage and the stepping progress.
pub fn run_scenario_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let name = request.scenario.name.as_str();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        name,
        RunStage::Validating,
        started,
        Some("Validating scenario".to_string()),
        None,
    );
    hf_project::validate_scenario(request.scenario)?;

    emit_progress(
        &mut progress_cb,
        name,
        RunStage::Compiling,
        started,
        Some("Building thermal network".to_string()),
        None,
    );
    let compile_started = Instant::now();
    let mut compiled = compile_scenario(request.scenario)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        name,
        RunStage::Simulating,
        started,
        Some(format!("Stepping {} time levels", compiled.options.steps)),
        None,
    );
    let simulate_started = Instant::now();
    let record = {
        let mut on_step = |p: SimProgress| {
            emit_progress(
                &mut progress_cb,
                name,
                RunStage::Simulating,
                started,
                None,
                Some(SimulationProgress {
                    step: p.step,
                    steps: p.steps,
                    sim_time_s: p.sim_time_s,
                    fraction_complete: p.fraction_complete(),
                }),
            );
        };
        run_sim_with_progress(&mut compiled.model, &compiled.options, Some(&mut on_step))?
    };
    timing.simulate_time_s = simulate_started.elapsed().as_secs_f64();

    finish_run(request, &compiled, &record, started, timing, progress_cb)
}

/// Run independent scenarios in parallel.
///
/// Compilation and persistence happen on the calling thread; only the time
/// stepping is spread over worker threads. Results come back in input order
/// and a failing scenario does not affect the others.
pub fn run_batch(scenarios: &[Scenario], output_dir: Option<&Path>) -> Vec<AppResult<RunResponse>> {
    let started = Instant::now();
    let compiled: Vec<AppResult<(CompiledScenario, f64)>> = scenarios
        .iter()
        .map(|scenario| {
            let t = Instant::now();
            compile_scenario(scenario).map(|c| (c, t.elapsed().as_secs_f64()))
        })
        .collect();

    let jobs: Vec<_> = compiled
        .iter()
        .filter_map(|c| c.as_ref().ok())
        .map(|(c, _)| (c.model.clone(), c.options.clone()))
        .collect();
    let simulate_started = Instant::now();
    let mut outcomes = hf_sim::run_batch(jobs).into_iter();
    let simulate_time_s = simulate_started.elapsed().as_secs_f64();

    info!(
        scenarios = scenarios.len(),
        elapsed_s = simulate_time_s,
        "batch simulated"
    );

    scenarios
        .iter()
        .zip(compiled)
        .map(|(scenario, compiled)| {
            let (compiled, compile_time_s) = compiled?;
            let record = outcomes.next().ok_or_else(|| {
                AppError::Simulation(format!("no batch result for '{}'", scenario.name))
            })??;
            let request = RunRequest {
                scenario,
                output_dir,
            };
            let timing = RunTimingSummary {
                compile_time_s,
                simulate_time_s,
                ..RunTimingSummary::default()
            };
            finish_run(&request, &compiled, &record, started, timing, None)
        })
        .collect()
}

fn finish_run(
    request: &RunRequest,
    compiled: &CompiledScenario,
    record: &SimRecord<CoupledState>,
    started: Instant,
    mut timing: RunTimingSummary,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let name = request.scenario.name.as_str();

    emit_progress(
        &mut progress_cb,
        name,
        RunStage::Summarizing,
        started,
        Some("Summarizing results".to_string()),
        None,
    );
    let summarize_started = Instant::now();
    let records = to_records(record);
    let summary = RunSummary::from_records(&records)?;
    let manifest = manifest_for(request.scenario, compiled);
    timing.summarize_time_s = summarize_started.elapsed().as_secs_f64();

    let saved_to = match request.output_dir {
        Some(dir) => {
            emit_progress(
                &mut progress_cb,
                name,
                RunStage::SavingResults,
                started,
                Some(format!("Saving run {}", manifest.run_id)),
                None,
            );
            let save_started = Instant::now();
            let store = RunStore::new(dir.to_path_buf())?;
            let path = store.save_run(&manifest, &records, &summary)?;
            timing.save_time_s = save_started.elapsed().as_secs_f64();
            Some(path)
        }
        None => None,
    };

    timing.steps = compiled.options.steps;
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %manifest.run_id,
        final_room_c = summary.final_room_c,
        delivered_energy_kwh = summary.delivered_energy_kwh,
        total_time_s = timing.total_time_s,
        "run completed"
    );

    emit_progress(
        &mut progress_cb,
        name,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        manifest,
        records,
        summary,
        saved_to,
        timing,
    })
}

fn manifest_for(scenario: &Scenario, compiled: &CompiledScenario) -> RunManifest {
    let heating = compiled.model.heating();
    RunManifest {
        run_id: run_id(scenario),
        scenario_name: scenario.name.clone(),
        dt_s: compiled.options.dt_s,
        steps: compiled.options.steps,
        record_every: compiled.options.record_every,
        node_names: compiled.node_names.clone(),
        radiator_segments: heating.map_or(0, |h| h.radiator.segments()),
        has_valve: heating.is_some_and(|h| h.valve.is_some()),
    }
}

/// Flatten coupled states into exportable rows.
pub fn to_records(record: &SimRecord<CoupledState>) -> Vec<TimeseriesRecord> {
    record
        .iter()
        .map(|(t, x)| TimeseriesRecord {
            time_s: t,
            node_temperatures_c: x.envelope.clone(),
            radiator_temperatures_c: x
                .radiator
                .as_ref()
                .map(|r| r.segment_temperatures_c.clone())
                .unwrap_or_default(),
            room_temperature_c: x.coupling.room_temperature_c,
            heat_output_w: x.coupling.heat_output_w,
            mass_flow_kgps: x.coupling.mass_flow_kgps,
            sensed_deviation_k: x.valve.as_ref().map(|v| v.sensed_deviation_k),
        })
        .collect()
}

/// Directory-safe run ID derived from the scenario name.
///
/// Runs of the same scenario share an ID, so a new run replaces the old one.
pub fn run_id(scenario: &Scenario) -> String {
    let mut id = String::with_capacity(scenario.name.len());
    for c in scenario.name.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c.to_ascii_lowercase());
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    if id.is_empty() {
        id.push_str("run");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_project::presets;

    fn named(name: &str) -> Scenario {
        Scenario {
            name: name.to_string(),
            ..presets::multi_layer_wall()
        }
    }

    #[test]
    fn run_ids_are_slugs() {
        assert_eq!(run_id(&named("single-layer wall with radiator")), "single-layer-wall-with-radiator");
        assert_eq!(run_id(&named("  Room #2 (north) ")), "room-2-north");
        assert_eq!(run_id(&named("***")), "run");
    }

    #[test]
    fn short_run_without_output_dir() {
        let mut scenario = presets::multi_layer_wall();
        scenario.simulation.steps = 50;
        let response = run_scenario(&RunRequest {
            scenario: &scenario,
            output_dir: None,
        })
        .unwrap();
        assert_eq!(response.records.len(), 50);
        assert!(response.saved_to.is_none());
        assert_eq!(response.manifest.node_names.len(), 7);
        assert_eq!(response.manifest.radiator_segments, 0);
        assert!(!response.manifest.has_valve);
        assert!(response.records[0].sensed_deviation_k.is_none());
    }
}
