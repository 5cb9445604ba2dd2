//! Qualifying-style ranking: each driver's fastest lap against pole.

use tracing::{debug, info, instrument};

use crate::error::LapsError;
use crate::lap::{LapTime, Laps};

/// One driver's row in the qualifying ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifyingEntry {
    /// 1-based rank.
    pub position: usize,
    /// Driver code.
    pub driver: String,
    /// Team name, when known.
    pub team: Option<String>,
    /// Lap number of the fastest lap.
    pub lap_number: u32,
    /// Fastest lap time.
    pub lap_time: LapTime,
    /// Seconds behind pole; zero for the pole sitter.
    pub delta: f64,
}

/// Fastest lap per driver sorted by lap time.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifyingResult {
    entries: Vec<QualifyingEntry>,
}

impl QualifyingResult {
    /// Rank every driver that set a timed lap.
    ///
    /// Drivers appear in first-appearance order before sorting, and the sort
    /// is stable, so equal lap times keep that order.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LapsError::NoValidLaps`] | No driver has a timed lap |
    #[instrument(skip_all, fields(n_laps = laps.len()))]
    pub fn from_laps(laps: &Laps) -> Result<Self, LapsError> {
        let mut fastest = Vec::new();
        for driver in laps.drivers() {
            match laps.pick_driver(driver).pick_fastest() {
                Some(lap) => {
                    if let Some(lap_time) = lap.lap_time {
                        fastest.push((lap_time, lap.clone()));
                    }
                }
                None => debug!(driver, "no timed lap, skipped"),
            }
        }
        if fastest.is_empty() {
            return Err(LapsError::NoValidLaps);
        }

        fastest.sort_by(|a, b| a.0.total_cmp(&b.0));
        let pole = fastest[0].0.seconds();

        let entries: Vec<QualifyingEntry> = fastest
            .into_iter()
            .enumerate()
            .map(|(i, (lap_time, lap))| QualifyingEntry {
                position: i + 1,
                driver: lap.driver,
                team: lap.team,
                lap_number: lap.lap_number,
                lap_time,
                delta: lap_time.seconds() - pole,
            })
            .collect();

        info!(n_drivers = entries.len(), pole = %entries[0].lap_time, "qualifying ranked");
        Ok(Self { entries })
    }

    /// Return the entries in rank order. Never empty.
    #[must_use]
    pub fn entries(&self) -> &[QualifyingEntry] {
        &self.entries
    }

    /// Return the pole-sitter's entry.
    #[must_use]
    pub fn pole(&self) -> &QualifyingEntry {
        &self.entries[0]
    }

    /// Chart title, e.g. `"Monza 2021 Qualifying\nFastest Lap: 1:19.555 (VER)"`.
    #[must_use]
    pub fn headline(&self, event: &str, year: u16) -> String {
        let pole = self.pole();
        format!(
            "{event} {year} Qualifying\nFastest Lap: {} ({})",
            pole.lap_time, pole.driver
        )
    }
}

/// Format a delta to pole for a bar label.
///
/// One second and above renders as `+1.234s`, below that as `+123ms`.
#[must_use]
pub fn format_delta(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("+{seconds:.3}s")
    } else {
        format!("+{:.0}ms", seconds * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lap::tests::lap;

    #[test]
    fn ranks_by_fastest_lap() {
        let laps = Laps::new(vec![
            lap("HAM", 1, Some(80.5)),
            lap("VER", 1, Some(80.9)),
            lap("HAM", 2, Some(80.2)),
            lap("VER", 2, Some(80.1)),
            lap("BOT", 1, Some(81.4)),
        ]);
        let result = QualifyingResult::from_laps(&laps).unwrap();
        let order: Vec<&str> = result.entries().iter().map(|e| e.driver.as_str()).collect();
        assert_eq!(order, vec!["VER", "HAM", "BOT"]);
        assert_eq!(result.pole().delta, 0.0);
        assert!((result.entries()[1].delta - 0.1).abs() < 1e-9);
        assert_eq!(result.entries()[2].position, 3);
        assert_eq!(result.entries()[1].lap_number, 2);
    }

    #[test]
    fn drivers_without_timed_laps_are_skipped() {
        let laps = Laps::new(vec![lap("MSC", 1, None), lap("RUS", 1, Some(82.0))]);
        let result = QualifyingResult::from_laps(&laps).unwrap();
        assert_eq!(result.entries().len(), 1);
        assert_eq!(result.pole().driver, "RUS");
    }

    #[test]
    fn no_timed_laps_is_an_error() {
        let laps = Laps::new(vec![lap("MSC", 1, None)]);
        assert!(matches!(QualifyingResult::from_laps(&laps), Err(LapsError::NoValidLaps)));
        let empty = QualifyingResult::from_laps(&Laps::default());
        assert!(matches!(empty, Err(LapsError::NoValidLaps)));
    }

    #[test]
    fn equal_times_keep_appearance_order() {
        let laps = Laps::new(vec![lap("NOR", 1, Some(81.0)), lap("PIA", 1, Some(81.0))]);
        let result = QualifyingResult::from_laps(&laps).unwrap();
        assert_eq!(result.entries()[0].driver, "NOR");
        assert_eq!(result.entries()[1].driver, "PIA");
    }

    #[test]
    fn pole_is_first_entry() {
        let laps = Laps::new(vec![lap("LEC", 1, Some(82.3)), lap("SAI", 1, Some(81.7))]);
        let result = QualifyingResult::from_laps(&laps).unwrap();
        let entries = result.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(result.pole(), &entries[0]);
        assert_eq!(result.pole().driver, "SAI");
        assert_eq!(entries[0].position, 1);
    }

    #[test]
    fn headline_format() {
        let laps = Laps::new(vec![lap("VER", 1, Some(79.555))]);
        let result = QualifyingResult::from_laps(&laps).unwrap();
        assert_eq!(
            result.headline("Monza", 2021),
            "Monza 2021 Qualifying\nFastest Lap: 1:19.555 (VER)"
        );
    }

    #[test]
    fn delta_labels() {
        assert_eq!(format_delta(0.0), "+0ms");
        assert_eq!(format_delta(0.123), "+123ms");
        assert_eq!(format_delta(1.0), "+1.000s");
        assert_eq!(format_delta(2.3456), "+2.346s");
    }
}
