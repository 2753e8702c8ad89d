//! CSV and JSON Lines writers.

use std::io::{BufRead, Write};

use crate::ResultsResult;
use crate::types::{RunManifest, TimeseriesRecord, column_name};

/// Write one header row and one row per record.
///
/// Columns: `time_s`, one `T_<node>_c` per envelope node, one
/// `radiator_<i>_c` per segment, then `heat_output_w`, `mass_flow_kgps` and
/// `sensed_deviation_k` (empty when there is no valve).
pub fn write_csv<W: Write>(mut out: W, manifest: &RunManifest, records: &[TimeseriesRecord]) -> ResultsResult<()> {
    let mut header = vec!["time_s".to_string()];
    header.extend(manifest.node_names.iter().map(|n| format!("T_{}_c", column_name(n))));
    header.extend((1..=manifest.radiator_segments).map(|i| format!("radiator_{i}_c")));
    header.extend(["heat_output_w", "mass_flow_kgps", "sensed_deviation_k"].map(String::from));
    writeln!(out, "{}", header.join(","))?;

    for record in records {
        let mut row = Vec::with_capacity(header.len());
        row.push(record.time_s.to_string());
        row.extend(record.node_temperatures_c.iter().map(f64::to_string));
        row.extend(record.radiator_temperatures_c.iter().map(f64::to_string));
        row.push(record.heat_output_w.to_string());
        row.push(record.mass_flow_kgps.to_string());
        row.push(record.sensed_deviation_k.map(|v| v.to_string()).unwrap_or_default());
        writeln!(out, "{}", row.join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// One JSON object per line.
pub fn write_jsonl<W: Write>(mut out: W, records: &[TimeseriesRecord]) -> ResultsResult<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Read records written by [`write_jsonl`], skipping blank lines.
pub fn read_jsonl<R: BufRead>(input: R) -> ResultsResult<Vec<TimeseriesRecord>> {
    let mut records = Vec::new();
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(&line)?);
        }
    }
    Ok(records)
}
