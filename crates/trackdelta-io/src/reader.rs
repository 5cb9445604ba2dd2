//! CSV telemetry reader for one driver's lap.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use trackdelta_align::{integrate_distance, TelemetrySample, TelemetrySeries};
use trackdelta_laps::PositionSample;

use crate::columns::{cell, is_missing, parse_channel, read_table};
use crate::domain::DriverCode;
use crate::duration::parse_seconds;
use crate::IoError;

/// Reads one lap of car and position telemetry from a CSV export.
///
/// Expected CSV format:
/// - Header row required; column names follow the timing provider
///   (`Distance, Time, Speed, RPM, Throttle, Brake, nGear, DRS, X, Y`).
///   Matching ignores case and order; unknown columns are ignored.
/// - Empty cells and `NaN`/`NA` mark missing values; `True`/`False` read as 1/0.
/// - `Time` may be seconds, `m:ss.fff` or a pandas timedelta.
/// - Without a `Distance` column, distance is integrated from `Time` and `Speed`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::MissingColumn`] | No `Distance` column and no `Time` + `Speed` to integrate from; no `X`/`Y` for positions |
/// | [`IoError::InvalidValue`] | Cell is unparseable or infinite |
/// | [`IoError::DistanceIntegration`] | Distance integration failed |
/// | [`IoError::InvalidSeries`] | Distances are non-finite or decreasing |
pub struct TelemetryReader {
    path: PathBuf,
    driver: DriverCode,
}

impl TelemetryReader {
    /// Create a new reader for the given CSV file and driver.
    pub fn new(path: &Path, driver: DriverCode) -> Self {
        Self {
            path: path.to_path_buf(),
            driver,
        }
    }

    /// Read car telemetry into a validated [`TelemetrySeries`].
    #[instrument(skip(self), fields(path = %self.path.display(), driver = %self.driver))]
    pub fn read(&self) -> Result<TelemetrySeries, IoError> {
        let table = read_table(&self.path)?;
        let cols = &table.columns;

        let distance_col = cols.find("Distance");
        let time_col = cols.find("Time");
        if distance_col.is_none() {
            cols.require(&self.path, "Time")?;
            cols.require(&self.path, "Speed")?;
        }
        let speed_col = cols.find("Speed");
        let rpm_col = cols.find("RPM");
        let throttle_col = cols.find("Throttle");
        let brake_col = cols.find("Brake");
        let gear_col = cols.find("nGear");
        let drs_col = cols.find("DRS");

        let mut samples = Vec::with_capacity(table.records.len());
        for (row_index, record) in table.records.iter().enumerate() {
            let channel = |column: &'static str, position: Option<usize>| {
                parse_channel(&self.path, row_index, column, cell(record, position))
            };

            let distance = match distance_col {
                Some(_) => channel("Distance", distance_col)?.ok_or_else(|| IoError::InvalidValue {
                    path: self.path.clone(),
                    row_index,
                    column: "Distance",
                    raw: cell(record, distance_col).to_string(),
                })?,
                None => 0.0,
            };
            let timestamp = match time_col {
                Some(_) => self.parse_time(row_index, cell(record, time_col))?,
                None => None,
            };

            samples.push(TelemetrySample {
                distance,
                speed: channel("Speed", speed_col)?,
                rpm: channel("RPM", rpm_col)?,
                throttle: channel("Throttle", throttle_col)?,
                brake: channel("Brake", brake_col)?,
                gear: channel("nGear", gear_col)?,
                drs: channel("DRS", drs_col)?,
                timestamp,
            });
        }

        if distance_col.is_none() {
            integrate_distance(&mut samples).map_err(|source| IoError::DistanceIntegration {
                path: self.path.clone(),
                source,
            })?;
            debug!("distance integrated from speed and time");
        }

        let series = TelemetrySeries::new(self.driver.as_str(), samples).map_err(|source| {
            IoError::InvalidSeries {
                path: self.path.clone(),
                source,
            }
        })?;

        info!(
            n_samples = series.len(),
            lap_distance = series.distance_range().map_or(0.0, |(a, b)| b - a),
            "telemetry loaded"
        );
        Ok(series)
    }

    /// Read `X`, `Y` and `nGear` into track positions for a gear map.
    #[instrument(skip(self), fields(path = %self.path.display(), driver = %self.driver))]
    pub fn read_positions(&self) -> Result<Vec<PositionSample>, IoError> {
        let table = read_table(&self.path)?;
        let x_col = Some(table.columns.require(&self.path, "X")?);
        let y_col = Some(table.columns.require(&self.path, "Y")?);
        let gear_col = table.columns.find("nGear");

        let mut positions = Vec::with_capacity(table.records.len());
        for (row_index, record) in table.records.iter().enumerate() {
            let x = parse_channel(&self.path, row_index, "X", cell(record, x_col))?;
            let y = parse_channel(&self.path, row_index, "Y", cell(record, y_col))?;
            // rows without a fix are dropped rather than drawn at the origin
            let (Some(x), Some(y)) = (x, y) else {
                continue;
            };
            let gear = parse_channel(&self.path, row_index, "nGear", cell(record, gear_col))?;
            positions.push(PositionSample { x, y, gear });
        }

        info!(n_positions = positions.len(), "positions loaded");
        Ok(positions)
    }

    fn parse_time(&self, row_index: usize, raw: &str) -> Result<Option<f64>, IoError> {
        if is_missing(raw) {
            return Ok(None);
        }
        parse_seconds(raw).map(Some).ok_or_else(|| IoError::InvalidValue {
            path: self.path.clone(),
            row_index,
            column: "Time",
            raw: raw.to_string(),
        })
    }
}
