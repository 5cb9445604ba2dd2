//! CSV reader for a session's lap table.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use trackdelta_laps::{LapRecord, LapTime, Laps};

use crate::columns::{cell, is_missing, read_table};
use crate::duration::parse_seconds;
use crate::IoError;

/// Reads lap records from a CSV export.
///
/// Expected CSV format:
/// - Header row with `Driver`, `LapNumber` and `LapTime`; `Team` is optional.
/// - `LapNumber` may be written as a float (`12.0`).
/// - `LapTime` accepts the forms of [`parse_seconds`](crate::parse_seconds);
///   an empty or `NaT` cell is an untimed lap.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::MissingColumn`] | `Driver`, `LapNumber` or `LapTime` absent |
/// | [`IoError::InvalidValue`] | Blank driver, non-integral lap number, unparseable lap time |
pub struct LapReader {
    path: PathBuf,
}

impl LapReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read all laps in file order.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Laps, IoError> {
        let table = read_table(&self.path)?;
        let driver_col = Some(table.columns.require(&self.path, "Driver")?);
        let lap_number_col = Some(table.columns.require(&self.path, "LapNumber")?);
        let lap_time_col = Some(table.columns.require(&self.path, "LapTime")?);
        let team_col = table.columns.find("Team");

        let mut records = Vec::with_capacity(table.records.len());
        for (row_index, record) in table.records.iter().enumerate() {
            let invalid = |column: &'static str, raw: &str| IoError::InvalidValue {
                path: self.path.clone(),
                row_index,
                column,
                raw: raw.to_string(),
            };

            let driver = cell(record, driver_col).trim();
            if driver.is_empty() {
                return Err(invalid("Driver", driver));
            }

            let raw_number = cell(record, lap_number_col);
            let lap_number = raw_number
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| {
                    n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX)
                })
                .ok_or_else(|| invalid("LapNumber", raw_number))? as u32;

            let raw_time = cell(record, lap_time_col);
            let lap_time = if is_missing(raw_time) {
                None
            } else {
                let seconds = parse_seconds(raw_time).ok_or_else(|| invalid("LapTime", raw_time))?;
                Some(LapTime::from_seconds(seconds).ok_or_else(|| invalid("LapTime", raw_time))?)
            };

            let team = cell(record, team_col).trim();
            records.push(LapRecord {
                driver: driver.to_ascii_uppercase(),
                team: (!is_missing(team)).then(|| team.to_string()),
                lap_number,
                lap_time,
            });
        }

        let laps = Laps::new(records);
        info!(
            n_laps = laps.len(),
            n_drivers = laps.drivers().len(),
            "laps loaded"
        );
        Ok(laps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn reads_timedelta_and_untimed_laps() {
        let csv = "Driver,Team,LapNumber,LapTime\n\
                   VER,Red Bull Racing,1.0,0 days 00:01:26.433000\n\
                   VER,Red Bull Racing,2.0,NaT\n\
                   ham,Mercedes,1,1:25.990\n";
        let f = write_csv(csv);
        let laps = LapReader::new(f.path()).read().unwrap();
        assert_eq!(laps.len(), 3);

        let first = &laps.records()[0];
        assert_eq!(first.lap_number, 1);
        assert_eq!(first.team.as_deref(), Some("Red Bull Racing"));
        assert!((first.lap_time.unwrap().seconds() - 86.433).abs() < 1e-9);
        assert_eq!(laps.records()[1].lap_time, None);
        assert_eq!(laps.records()[2].driver, "HAM");
    }

    #[test]
    fn team_is_optional() {
        let csv = "Driver,LapNumber,LapTime\nVER,1,81.5\n";
        let f = write_csv(csv);
        let laps = LapReader::new(f.path()).read().unwrap();
        assert_eq!(laps.records()[0].team, None);
    }

    #[test]
    fn error_missing_lap_time_column() {
        let csv = "Driver,LapNumber\nVER,1\n";
        let f = write_csv(csv);
        let result = LapReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::MissingColumn { column: "LapTime", .. })));
    }

    #[test]
    fn error_fractional_lap_number() {
        let csv = "Driver,LapNumber,LapTime\nVER,1.5,81.5\n";
        let f = write_csv(csv);
        let result = LapReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::InvalidValue { column: "LapNumber", .. })));
    }

    #[test]
    fn error_negative_lap_time() {
        let csv = "Driver,LapNumber,LapTime\nVER,1,-3\n";
        let f = write_csv(csv);
        let result = LapReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::InvalidValue { column: "LapTime", .. })));
    }

    #[test]
    fn error_blank_driver() {
        let csv = "Driver,LapNumber,LapTime\n,1,81.5\n";
        let f = write_csv(csv);
        let result = LapReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::InvalidValue { row_index: 0, column: "Driver", .. })));
    }

    #[test]
    fn error_empty_dataset() {
        let f = write_csv("Driver,LapNumber,LapTime\n");
        let result = LapReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::EmptyDataset { .. })));
    }
}
