//! Lap records and lap-time values.

use std::cmp::Ordering;
use std::fmt;

/// A lap time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LapTime(f64);

impl LapTime {
    /// Create a lap time from seconds. Returns `None` for non-finite or negative input.
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds >= 0.0).then_some(Self(seconds))
    }

    /// Return the lap time in seconds.
    #[must_use]
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Renders `m:ss.mmm`, e.g. `1:21.046`.
impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = (self.0 * 1000.0).round() as u64;
        let minutes = total_ms / 60_000;
        let seconds = (total_ms / 1000) % 60;
        let millis = total_ms % 1000;
        write!(f, "{minutes}:{seconds:02}.{millis:03}")
    }
}

/// One lap of one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct LapRecord {
    /// Three-letter driver abbreviation.
    pub driver: String,
    /// Team name, when known.
    pub team: Option<String>,
    /// Lap number within the session, starting at 1.
    pub lap_number: u32,
    /// Lap time; `None` for untimed laps (in/out laps, red flags).
    pub lap_time: Option<LapTime>,
}

/// The laps of a session, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Laps(Vec<LapRecord>);

impl Laps {
    /// Wrap lap records.
    #[must_use]
    pub fn new(records: Vec<LapRecord>) -> Self {
        Self(records)
    }

    /// Return the records.
    #[must_use]
    pub fn records(&self) -> &[LapRecord] {
        &self.0
    }

    /// Return the number of laps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if there are no laps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the laps of one driver, in source order.
    #[must_use]
    pub fn pick_driver(&self, driver: &str) -> Laps {
        Laps(self.0.iter().filter(|l| l.driver == driver).cloned().collect())
    }

    /// Return the lap with the smallest lap time.
    ///
    /// Untimed laps are ignored; among equal times the earliest record wins.
    #[must_use]
    pub fn pick_fastest(&self) -> Option<&LapRecord> {
        self.0
            .iter()
            .filter_map(|l| l.lap_time.map(|t| (t, l)))
            .reduce(|best, next| match next.0.total_cmp(&best.0) {
                Ordering::Less => next,
                _ => best,
            })
            .map(|(_, lap)| lap)
    }

    /// Return the distinct driver codes in order of first appearance.
    #[must_use]
    pub fn drivers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for lap in &self.0 {
            if !seen.contains(&lap.driver.as_str()) {
                seen.push(&lap.driver);
            }
        }
        seen
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn lap(driver: &str, lap_number: u32, seconds: Option<f64>) -> LapRecord {
        LapRecord {
            driver: driver.to_string(),
            team: None,
            lap_number,
            lap_time: seconds.and_then(LapTime::from_seconds),
        }
    }

    #[test]
    fn lap_time_display() {
        assert_eq!(LapTime::from_seconds(81.046).unwrap().to_string(), "1:21.046");
        assert_eq!(LapTime::from_seconds(59.9996).unwrap().to_string(), "1:00.000");
        assert_eq!(LapTime::from_seconds(5.5).unwrap().to_string(), "0:05.500");
    }

    #[test]
    fn lap_time_rejects_invalid() {
        assert!(LapTime::from_seconds(f64::NAN).is_none());
        assert!(LapTime::from_seconds(-1.0).is_none());
    }

    #[test]
    fn pick_fastest_ignores_untimed_and_keeps_first_tie() {
        let laps = Laps::new(vec![
            lap("VER", 1, None),
            lap("VER", 2, Some(82.0)),
            lap("HAM", 2, Some(81.5)),
            lap("VER", 3, Some(81.5)),
        ]);
        let fastest = laps.pick_fastest().unwrap();
        assert_eq!(fastest.driver, "HAM");
        assert_eq!(fastest.lap_number, 2);
    }

    #[test]
    fn pick_fastest_none_when_untimed() {
        let laps = Laps::new(vec![lap("VER", 1, None)]);
        assert!(laps.pick_fastest().is_none());
        assert!(Laps::default().pick_fastest().is_none());
    }

    #[test]
    fn drivers_in_first_appearance_order() {
        let laps = Laps::new(vec![
            lap("LEC", 1, Some(90.0)),
            lap("VER", 1, Some(89.0)),
            lap("LEC", 2, Some(88.0)),
            lap("NOR", 1, None),
        ]);
        assert_eq!(laps.drivers(), vec!["LEC", "VER", "NOR"]);
        assert_eq!(laps.pick_driver("LEC").len(), 2);
        assert!(laps.pick_driver("ALO").is_empty());
    }
}
