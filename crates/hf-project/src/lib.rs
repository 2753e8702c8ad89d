//! hf-project: scenario file format, validation and reference presets.

pub mod presets;
pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

/// Newest scenario format version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_yaml::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_yaml(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    std::fs::write(path, to_yaml_string(scenario)?)?;
    Ok(())
}

/// Serialize a validated scenario to YAML text.
pub fn to_yaml_string(scenario: &Scenario) -> ProjectResult<String> {
    validate_scenario(scenario)?;
    Ok(serde_yaml::to_string(scenario)?)
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a scenario, picking the format from the file extension.
pub fn load(path: &std::path::Path) -> ProjectResult<Scenario> {
    match extension(path).as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        other => Err(ProjectError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Save a scenario, picking the format from the file extension.
pub fn save(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    match extension(path).as_str() {
        "yaml" | "yml" => save_yaml(path, scenario),
        "json" => save_json(path, scenario),
        other => Err(ProjectError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

fn extension(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
