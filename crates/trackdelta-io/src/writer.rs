//! JSON chart-data writer for session reports.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use trackdelta_align::AlignedFrame;
use trackdelta_laps::{format_delta, GearMap, LapTime, LapTimeComparison, QualifyingResult};

use crate::domain::ReportName;
use crate::IoError;

/// Writes report artifacts to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{report}_telemetry.json`, `{report}_lap_times.json`,
/// `{report}_qualifying.json` and `{report}_gear_map.json`.
pub struct ReportWriter {
    output_dir: PathBuf,
    report: ReportName,
}

impl ReportWriter {
    /// Create a new writer targeting the given directory and report name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), report = %report))]
    pub fn new(output_dir: &Path, report: ReportName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            report,
        })
    }

    /// Path of the artifact with the given suffix, e.g. `telemetry`.
    #[must_use]
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{suffix}.json", self.report.as_str()))
    }

    /// Write aligned channels to `{report}_telemetry.json`.
    ///
    /// Channels of each driver are keyed by their lower-case name and share
    /// the `distance` axis.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n_drivers = frame.drivers().len(), n_points = frame.n_points()))]
    pub fn write_telemetry(&self, frame: &AlignedFrame) -> Result<PathBuf, IoError> {
        let drivers: BTreeMap<&str, BTreeMap<&str, &[f64]>> = frame
            .drivers()
            .iter()
            .map(|d| {
                let channels = d.channels().map(|(c, v)| (c.as_str(), v)).collect();
                (d.driver(), channels)
            })
            .collect();

        let artifact = TelemetryArtifact {
            report: self.report.as_str(),
            n_points: frame.n_points(),
            distance: frame.grid().as_slice(),
            drivers,
        };
        self.write("telemetry", &artifact)
    }

    /// Write lap-time evolution to `{report}_lap_times.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n_traces = comparison.traces.len()))]
    pub fn write_lap_times(&self, comparison: &LapTimeComparison) -> Result<PathBuf, IoError> {
        let traces = comparison
            .traces
            .iter()
            .map(|t| LapTraceEntry {
                driver: &t.driver,
                lap_numbers: t.points.iter().map(|(n, _)| *n).collect(),
                lap_times: t.points.iter().map(|(_, lt)| lt.map(LapTime::seconds)).collect(),
                fastest: t.fastest().map(|(n, lt)| FastestEntry {
                    lap_number: n,
                    lap_time: lt.seconds(),
                    label: lt.to_string(),
                }),
            })
            .collect();

        let artifact = LapTimesArtifact {
            report: self.report.as_str(),
            traces,
        };
        self.write("lap_times", &artifact)
    }

    /// Write the qualifying ranking to `{report}_qualifying.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n_entries = result.entries().len()))]
    pub fn write_qualifying(
        &self,
        result: &QualifyingResult,
        event: &str,
        year: u16,
    ) -> Result<PathBuf, IoError> {
        let entries = result
            .entries()
            .iter()
            .map(|e| QualifyingRow {
                position: e.position,
                driver: &e.driver,
                team: e.team.as_deref(),
                lap_number: e.lap_number,
                lap_time: e.lap_time.seconds(),
                lap_time_label: e.lap_time.to_string(),
                delta: e.delta,
                // pole carries no bar label
                delta_label: (e.position > 1).then(|| format_delta(e.delta)),
            })
            .collect();

        let artifact = QualifyingArtifact {
            report: self.report.as_str(),
            title: result.headline(event, year),
            entries,
        };
        self.write("qualifying", &artifact)
    }

    /// Write the gear map of one fastest lap to `{report}_gear_map.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(driver = %driver, n_segments = map.segments().len()))]
    pub fn write_gear_map(
        &self,
        map: &GearMap,
        driver: &str,
        lap_time: LapTime,
    ) -> Result<PathBuf, IoError> {
        let segments = map
            .segments()
            .iter()
            .map(|s| SegmentEntry {
                start: [s.start.0, s.start.1],
                end: [s.end.0, s.end.1],
                gear: s.gear,
            })
            .collect();
        let view = map.view_window(GearMap::DEFAULT_PAD_FRACTION);

        let artifact = GearMapArtifact {
            report: self.report.as_str(),
            driver,
            hud: format!("Fastest Lap: {lap_time}  |  Driver: {driver}"),
            gear_range: map.gear_range().map(|(lo, hi)| [lo, hi]),
            view: [view.x_min, view.x_max, view.y_min, view.y_max],
            segments,
        };
        self.write("gear_map", &artifact)
    }

    fn write<T: Serialize>(&self, suffix: &str, artifact: &T) -> Result<PathBuf, IoError> {
        let path = self.artifact_path(suffix);
        let json = serde_json::to_string_pretty(artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "{suffix} artifact written");
        Ok(path)
    }
}

#[derive(Serialize)]
struct TelemetryArtifact<'a> {
    report: &'a str,
    n_points: usize,
    distance: &'a [f64],
    drivers: BTreeMap<&'a str, BTreeMap<&'a str, &'a [f64]>>,
}

#[derive(Serialize)]
struct LapTimesArtifact<'a> {
    report: &'a str,
    traces: Vec<LapTraceEntry<'a>>,
}

#[derive(Serialize)]
struct LapTraceEntry<'a> {
    driver: &'a str,
    lap_numbers: Vec<u32>,
    lap_times: Vec<Option<f64>>,
    fastest: Option<FastestEntry>,
}

#[derive(Serialize)]
struct FastestEntry {
    lap_number: u32,
    lap_time: f64,
    label: String,
}

#[derive(Serialize)]
struct QualifyingArtifact<'a> {
    report: &'a str,
    title: String,
    entries: Vec<QualifyingRow<'a>>,
}

#[derive(Serialize)]
struct QualifyingRow<'a> {
    position: usize,
    driver: &'a str,
    team: Option<&'a str>,
    lap_number: u32,
    lap_time: f64,
    lap_time_label: String,
    delta: f64,
    delta_label: Option<String>,
}

#[derive(Serialize)]
struct GearMapArtifact<'a> {
    report: &'a str,
    driver: &'a str,
    hud: String,
    gear_range: Option<[f64; 2]>,
    /// `[x_min, x_max, y_min, y_max]`
    view: [f64; 4],
    segments: Vec<SegmentEntry>,
}

#[derive(Serialize)]
struct SegmentEntry {
    start: [f64; 2],
    end: [f64; 2],
    gear: Option<f64>,
}
