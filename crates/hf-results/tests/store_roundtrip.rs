use hf_results::{RunManifest, RunStore, RunSummary, TimeseriesRecord};

fn manifest(run_id: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_name: "store test".to_string(),
        dt_s: 10.0,
        steps: 3,
        record_every: 1,
        node_names: vec!["room air".to_string()],
        radiator_segments: 0,
        has_valve: false,
    }
}

fn records() -> Vec<TimeseriesRecord> {
    (0..3)
        .map(|k| TimeseriesRecord {
            time_s: k as f64 * 10.0,
            node_temperatures_c: vec![20.0 - k as f64],
            radiator_temperatures_c: vec![],
            room_temperature_c: 20.0 - k as f64,
            heat_output_w: 0.0,
            mass_flow_kgps: 0.0,
            sensed_deviation_k: None,
        })
        .collect()
}

#[test]
fn save_and_load_run() {
    let root = std::env::temp_dir().join("hf_results_store_roundtrip");
    let store = RunStore::new(root).unwrap();
    store.delete_run("cooling").unwrap();

    let records = records();
    let summary = RunSummary::from_records(&records).unwrap();
    let dir = store.save_run(&manifest("cooling"), &records, &summary).unwrap();

    assert!(store.has_run("cooling"));
    assert!(dir.join("timeseries.csv").exists());
    assert_eq!(store.load_manifest("cooling").unwrap(), manifest("cooling"));
    assert_eq!(store.load_timeseries("cooling").unwrap(), records);
    let loaded = store.load_summary("cooling").unwrap();
    assert_eq!(loaded.record_count, summary.record_count);
    assert_eq!(loaded.final_room_c, 18.0);
    assert!((loaded.duration_h - summary.duration_h).abs() < 1e-12);
    assert!(store.list_runs().unwrap().iter().any(|m| m.run_id == "cooling"));

    store.delete_run("cooling").unwrap();
    assert!(!store.has_run("cooling"));
    assert!(store.load_manifest("cooling").is_err());
}
