//! hf-results: time-series records, exporters and run storage.

pub mod export;
pub mod store;
pub mod summary;
pub mod types;

pub use export::{read_jsonl, write_csv, write_jsonl};
pub use store::RunStore;
pub use summary::RunSummary;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Empty run: {what}")]
    Empty { what: &'static str },
}
