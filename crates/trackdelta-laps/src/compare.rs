//! Lap-time evolution of several drivers over a session.

use tracing::{debug, instrument};

use crate::error::LapsError;
use crate::lap::{LapTime, Laps};

/// Lap times of one driver in lap order.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTimeTrace {
    /// Driver code.
    pub driver: String,
    /// `(lap_number, lap_time)`; untimed laps keep their slot with `None`.
    pub points: Vec<(u32, Option<LapTime>)>,
}

impl LapTimeTrace {
    /// Return the fastest timed lap as `(lap_number, lap_time)`.
    #[must_use]
    pub fn fastest(&self) -> Option<(u32, LapTime)> {
        self.points
            .iter()
            .filter_map(|&(n, t)| t.map(|t| (n, t)))
            .reduce(|best, next| if next.1.total_cmp(&best.1).is_lt() { next } else { best })
    }

    /// Return the number of timed laps.
    #[must_use]
    pub fn n_timed(&self) -> usize {
        self.points.iter().filter(|(_, t)| t.is_some()).count()
    }
}

/// Lap-time traces for a set of drivers, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTimeComparison {
    /// One trace per requested driver.
    pub traces: Vec<LapTimeTrace>,
}

impl LapTimeComparison {
    /// Build a trace for each driver from the session laps.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LapsError::UnknownDriver`] | A requested driver has no laps |
    #[instrument(skip_all, fields(n_laps = laps.len(), n_drivers = drivers.len()))]
    pub fn new(laps: &Laps, drivers: &[&str]) -> Result<Self, LapsError> {
        let mut traces = Vec::with_capacity(drivers.len());
        for &driver in drivers {
            let driver_laps = laps.pick_driver(driver);
            if driver_laps.is_empty() {
                return Err(LapsError::UnknownDriver {
                    driver: driver.to_string(),
                });
            }
            let mut points: Vec<(u32, Option<LapTime>)> = driver_laps
                .records()
                .iter()
                .map(|l| (l.lap_number, l.lap_time))
                .collect();
            points.sort_by_key(|&(n, _)| n);
            debug!(driver, n_laps = points.len(), "trace built");
            traces.push(LapTimeTrace {
                driver: driver.to_string(),
                points,
            });
        }
        Ok(Self { traces })
    }
}
