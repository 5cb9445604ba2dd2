//! End-to-end integration tests: session store -> analytics -> JSON -> deserialize.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trackdelta_align::{align_all, Channel, GridConfig, GridResolution};
use trackdelta_io::{DirectoryStore, DriverCode, ReportName, ReportWriter, SessionConfig, SessionStore};
use trackdelta_laps::{GearMap, LapTimeComparison, QualifyingResult};

/// Path to the test fixture directory.
fn fixture_root() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn open_store() -> DirectoryStore {
    let mut store = DirectoryStore::new(&fixture_root());
    store.open().expect("fixture root should exist");
    store
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn telemetry_round_trip() {
    let store = open_store();
    let config = SessionConfig::new()
        .with_grid(GridConfig::new().with_resolution(GridResolution::Points(50)));
    let key = config.key();

    let laps = store.load_laps(&key).unwrap();
    let available: Vec<DriverCode> = laps
        .drivers()
        .into_iter()
        .map(|d| DriverCode::new(d).unwrap())
        .collect();
    let (d1, d2) = config.resolve_drivers(&available).unwrap();
    assert_eq!((d1.as_str(), d2.as_str()), ("BOT", "HAM"));

    // BOT has no telemetry export; compare the two drivers that do.
    let ham = store.load_telemetry(&key, &d2).unwrap();
    let ver = store
        .load_telemetry(&key, &DriverCode::new("VER").unwrap())
        .unwrap();

    // HAM's export carries no Distance column; 300 km/h over 5 s integrates to ~416.7 m.
    let (_, ham_end) = ham.distance_range().unwrap();
    assert!((ham_end - 416.666_666).abs() < 1e-3);

    let frame = align_all(&[ver, ham], config.channels(), config.grid()).unwrap();
    assert_eq!(frame.n_points(), 50);
    assert!((frame.grid().end() - ham_end).abs() < 1e-9);

    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportName::new("monza".into()).unwrap()).unwrap();
    let path = writer.write_telemetry(&frame).unwrap();
    assert_eq!(path, dir.path().join("monza_telemetry.json"));

    let content = read_json(&path);
    assert_eq!(content["report"], "monza");
    assert_eq!(content["distance"].as_array().unwrap().len(), 50);

    let drivers = content["drivers"].as_object().unwrap();
    assert_eq!(drivers.len(), 2);
    for (driver, channels) in drivers {
        let channels = channels.as_object().unwrap();
        assert_eq!(channels.len(), Channel::ALL.len(), "driver {driver}");
        for (name, values) in channels {
            let values = values.as_array().unwrap();
            assert_eq!(values.len(), 50, "{driver}/{name}");
        }
        // gears are step-held so they stay integral
        for v in channels["gear"].as_array().unwrap() {
            let g = v.as_f64().unwrap();
            assert_eq!(g, g.round(), "{driver} gear {g}");
        }
    }

    // VER's missing RPM cell is reinterpolated from its neighbours.
    let ver_rpm = drivers["VER"]["rpm"].as_array().unwrap();
    assert!(ver_rpm.iter().all(|v| v.as_f64().unwrap() >= 9800.0));
}

#[test]
fn lap_times_round_trip() {
    let store = open_store();
    let key = SessionConfig::new().key();
    let laps = store.load_laps(&key).unwrap();

    let comparison = LapTimeComparison::new(&laps, &["VER", "HAM"]).unwrap();

    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportName::new("laps".into()).unwrap()).unwrap();
    let content = read_json(&writer.write_lap_times(&comparison).unwrap());

    let traces = content["traces"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["driver"], "VER");
    assert!(traces[0]["lap_times"][2].is_null());
    assert_eq!(traces[0]["fastest"]["label"], "1:24.812");
    assert_eq!(traces[1]["fastest"]["lap_number"], 3);
}

#[test]
fn qualifying_round_trip() {
    let store = open_store();
    let config = SessionConfig::new();
    let laps = store.load_laps(&config.key()).unwrap();

    let result = QualifyingResult::from_laps(&laps).unwrap();

    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportName::new("quali".into()).unwrap()).unwrap();
    let content = read_json(
        &writer
            .write_qualifying(&result, config.event(), config.year())
            .unwrap(),
    );

    assert_eq!(content["title"], "Monza 2021 Qualifying\nFastest Lap: 1:24.812 (VER)");
    let entries = content["entries"].as_array().unwrap();
    let order: Vec<&str> = entries.iter().map(|e| e["driver"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["VER", "HAM", "BOT"]);
    assert_eq!(entries[1]["delta_label"], "+192ms");
    assert_eq!(entries[2]["delta_label"], "+1.208s");
    assert_eq!(entries[2]["team"], "Mercedes");
}

#[test]
fn gear_map_round_trip() {
    let store = open_store();
    let key = SessionConfig::new().key();
    let laps = store.load_laps(&key).unwrap();

    let fastest = laps.pick_fastest().unwrap();
    let lap_time = fastest.lap_time.unwrap();
    let driver = DriverCode::new(&fastest.driver).unwrap();
    let positions = store.load_positions(&key, &driver).unwrap();
    let map = GearMap::from_positions(&positions).unwrap();

    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportName::new("track".into()).unwrap()).unwrap();
    let content = read_json(&writer.write_gear_map(&map, &fastest.driver, lap_time).unwrap());

    assert_eq!(content["hud"], "Fastest Lap: 1:24.812  |  Driver: VER");
    assert_eq!(content["segments"].as_array().unwrap().len(), positions.len() - 1);
    assert_eq!(content["gear_range"], serde_json::json!([5.0, 7.0]));

    let view: Vec<f64> = content["view"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    // square window
    assert!(((view[1] - view[0]) - (view[3] - view[2])).abs() < 1e-9);
}
