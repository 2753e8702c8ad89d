//! Run storage API.
//!
//! Each run lives in its own directory:
//!
//! ```text
//! <root>/<run_id>/manifest.json
//! <root>/<run_id>/timeseries.jsonl
//! <root>/<run_id>/timeseries.csv
//! <root>/<run_id>/summary.json
//! ```

use crate::export::{read_jsonl, write_csv, write_jsonl};
use crate::summary::RunSummary;
use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    /// Write manifest, both time-series formats and the summary, replacing
    /// any earlier run with the same ID.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
        summary: &RunSummary,
    ) -> ResultsResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        fs::write(run_dir.join("manifest.json"), serde_json::to_string_pretty(manifest)?)?;
        fs::write(run_dir.join("summary.json"), serde_json::to_string_pretty(summary)?)?;

        let jsonl = BufWriter::new(fs::File::create(run_dir.join("timeseries.jsonl"))?);
        write_jsonl(jsonl, records)?;

        let csv = BufWriter::new(fs::File::create(run_dir.join("timeseries.csv"))?);
        write_csv(csv, manifest, records)?;

        Ok(run_dir)
    }

    /// Path of `file` inside an existing run directory.
    fn run_file(&self, run_id: &str, file: &str) -> ResultsResult<PathBuf> {
        let path = self.run_dir(run_id).join(file);
        if path.exists() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.run_file(run_id, "manifest.json")?;
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn load_summary(&self, run_id: &str) -> ResultsResult<RunSummary> {
        let path = self.run_file(run_id, "summary.json")?;
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Records as written, read back from the JSON Lines file.
    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let path = self.run_file(run_id, "timeseries.jsonl")?;
        read_jsonl(BufReader::new(fs::File::open(path)?))
    }

    /// Manifests of every readable run, sorted by run ID.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        if !self.root_dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            // Directories without a valid manifest are not runs.
            if let Ok(manifest) = self.load_manifest(&entry.file_name().to_string_lossy()) {
                runs.push(manifest);
            }
        }
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
