//! Scenario loading and saving.

use std::path::Path;

use hf_project::{Scenario, presets};

use crate::error::{AppError, AppResult};

/// Load a scenario file (YAML or JSON by extension) and validate it.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(hf_project::load(path)?)
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    Ok(hf_project::save(path, scenario)?)
}

/// Interpret `source` as a preset name first, then as a file path.
pub fn resolve_scenario(source: &str) -> AppResult<Scenario> {
    match presets::by_name(source) {
        Some(scenario) => Ok(scenario),
        None => load_scenario(Path::new(source)),
    }
}
