use clap::{Parser, Subcommand};
use hf_app::{
    AppError, AppResult, RunProgressEvent, RunRequest, RunResponse, RunStage, RunTimingSummary,
    compile_scenario, project_service, run_service,
};
use hf_project::presets;
use hf_sim::ExplicitUpdater;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "heatflow")]
#[command(about = "heatflow - transient room heat balance with radiator and TRV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario and report its network size and stability limit
    Validate {
        /// Preset name or path to a YAML/JSON scenario
        scenario: String,
    },
    /// Run one scenario
    Run {
        /// Preset name or path to a YAML/JSON scenario
        scenario: String,
        /// Run store directory (results are not saved when omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Also write the time series as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Override the number of time levels
        #[arg(long)]
        steps: Option<usize>,
        /// Override the recording interval (in steps)
        #[arg(long)]
        record_every: Option<usize>,
    },
    /// Run several scenarios in parallel
    Batch {
        /// Preset names or scenario paths
        #[arg(required = true)]
        scenarios: Vec<String>,
        /// Run store directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Write a reference scenario to a file, or list the available presets
    Preset {
        /// Preset name; lists the presets when omitted
        name: Option<String>,
        /// Output path (.yaml, .yml or .json)
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario } => cmd_validate(&scenario),
        Commands::Run {
            scenario,
            output_dir,
            csv,
            steps,
            record_every,
        } => cmd_run(
            &scenario,
            output_dir.as_deref(),
            csv.as_deref(),
            steps,
            record_every,
        ),
        Commands::Batch {
            scenarios,
            output_dir,
        } => cmd_batch(&scenarios, output_dir.as_deref()),
        Commands::Preset { name, output } => cmd_preset(name.as_deref(), output.as_deref()),
    }
}

fn cmd_validate(source: &str) -> AppResult<()> {
    println!("Validating scenario: {}", source);
    let scenario = project_service::resolve_scenario(source)?;
    let compiled = compile_scenario(&scenario)?;

    let max_dt = ExplicitUpdater::max_stable_dt(&compiled.network);
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!("  Nodes: {}", compiled.node_names.join(", "));
    println!("  Links: {}", compiled.network.links().len());
    println!(
        "  dt = {:.3} s (stable up to {:.3} s)",
        compiled.options.dt_s, max_dt
    );
    if compiled.options.dt_s > max_dt {
        println!("  ! time step exceeds the explicit stability limit");
    }
    match compiled.model.heating() {
        Some(h) => println!(
            "  Heating: {} radiator segments, {}",
            h.radiator.segments(),
            if h.valve.is_some() { "thermostatic valve" } else { "constant flow" }
        ),
        None => println!("  Heating: none"),
    }
    Ok(())
}

fn cmd_run(
    source: &str,
    output_dir: Option<&Path>,
    csv: Option<&Path>,
    steps: Option<usize>,
    record_every: Option<usize>,
) -> AppResult<()> {
    let mut scenario = project_service::resolve_scenario(source)?;
    if let Some(steps) = steps {
        scenario.simulation.steps = steps;
    }
    if let Some(record_every) = record_every {
        scenario.simulation.record_every = record_every;
    }

    println!("Running scenario: {}", scenario.name);
    println!(
        "  dt = {:.3} s, steps = {}, horizon = {:.2} h",
        scenario.simulation.dt_s,
        scenario.simulation.steps,
        scenario.simulation.dt_s * scenario.simulation.steps.saturating_sub(1) as f64 / 3600.0
    );

    let request = RunRequest {
        scenario: &scenario,
        output_dir,
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::run_scenario_with_progress(
        &request,
        Some(&mut |event| {
            let fraction = event
                .simulation
                .as_ref()
                .map(|s| s.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Simulation completed: {}", response.run_id());
    print_timing_summary(&response.timing);
    print_run_summary(&response);

    if let Some(path) = csv {
        let out = BufWriter::new(File::create(path)?);
        hf_results::write_csv(out, &response.manifest, &response.records)?;
        println!(
            "✓ Exported {} time levels to {}",
            response.records.len(),
            path.display()
        );
    }

    Ok(())
}

fn cmd_batch(sources: &[String], output_dir: Option<&Path>) -> AppResult<()> {
    let scenarios = sources
        .iter()
        .map(|s| project_service::resolve_scenario(s))
        .collect::<AppResult<Vec<_>>>()?;

    println!("Running {} scenarios", scenarios.len());
    let results = run_service::run_batch(&scenarios, output_dir);

    let mut failures = 0usize;
    for (source, result) in sources.iter().zip(&results) {
        match result {
            Ok(response) => {
                println!("✓ {} -> {}", source, response.run_id());
                print_run_summary(response);
            }
            Err(e) => {
                failures += 1;
                println!("✗ {}: {}", source, e);
            }
        }
    }

    if failures > 0 {
        return Err(AppError::InvalidInput(format!(
            "{} of {} scenarios failed",
            failures,
            scenarios.len()
        )));
    }
    Ok(())
}

fn cmd_preset(name: Option<&str>, output: Option<&Path>) -> AppResult<()> {
    let Some(name) = name else {
        println!("Available presets:");
        for preset in presets::PRESET_NAMES {
            if let Some(scenario) = presets::by_name(preset) {
                println!("  {} - {}", preset, scenario.name);
            }
        }
        return Ok(());
    };

    let scenario = presets::by_name(name).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "unknown preset '{}', expected one of: {}",
            name,
            presets::PRESET_NAMES.join(", ")
        ))
    })?;

    match output {
        Some(path) => {
            project_service::save_scenario(path, &scenario)?;
            println!("✓ Wrote preset '{}' to {}", name, path.display());
        }
        None => {
            let yaml = hf_project::to_yaml_string(&scenario)?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, &event.simulation) {
        (RunStage::Simulating, Some(s)) => {
            let width = 28usize;
            let filled = ((s.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.0}s  step={}/{}  elapsed={:.1}s",
                bar,
                s.fraction_complete * 100.0,
                s.sim_time_s,
                s.step,
                s.steps,
                event.elapsed_wall_s
            );
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);

    println!("\nTiming summary:");
    println!(
        "  Compile:   {:.3}s ({:.1}%)",
        timing.compile_time_s,
        100.0 * timing.compile_time_s / total
    );
    println!(
        "  Simulate:  {:.3}s ({:.1}%)",
        timing.simulate_time_s,
        100.0 * timing.simulate_time_s / total
    );
    println!(
        "  Summarize: {:.3}s ({:.1}%)",
        timing.summarize_time_s,
        100.0 * timing.summarize_time_s / total
    );
    if timing.save_time_s > 0.0 {
        println!(
            "  Save:      {:.3}s ({:.1}%)",
            timing.save_time_s,
            100.0 * timing.save_time_s / total
        );
    }
    println!("  Total:     {:.3}s", timing.total_time_s);
    println!("  Steps:     {}", timing.steps);
}

fn print_run_summary(response: &RunResponse) {
    let s = &response.summary;
    println!("  Time points: {}", s.record_count);
    println!("  Duration: {:.2} h", s.duration_h);
    println!(
        "  Room: final {:.2} °C, min {:.2} °C, max {:.2} °C",
        s.final_room_c, s.min_room_c, s.max_room_c
    );
    if response.manifest.radiator_segments > 0 {
        println!(
            "  Heat output: peak {:.1} W, mean {:.1} W, delivered {:.3} kWh",
            s.peak_heat_output_w, s.mean_heat_output_w, s.delivered_energy_kwh
        );
    }
    if let Some(dir) = &response.saved_to {
        println!("  Saved to: {}", dir.display());
    }
}
