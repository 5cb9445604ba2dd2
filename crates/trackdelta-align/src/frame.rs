//! Aligned output: one shared grid and per-driver channel values.

use std::collections::BTreeMap;

use crate::channel::Channel;
use crate::grid::DistanceGrid;

/// Channel values of one driver, each sampled on the frame's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDriver {
    driver: String,
    channels: BTreeMap<Channel, Vec<f64>>,
}

impl AlignedDriver {
    pub(crate) fn new(driver: String, channels: BTreeMap<Channel, Vec<f64>>) -> Self {
        Self { driver, channels }
    }

    /// Return the driver label.
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Return the aligned values of `channel`, if it was requested.
    #[must_use]
    pub fn values(&self, channel: Channel) -> Option<&[f64]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    /// Iterate over `(channel, values)` in channel order.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, &[f64])> {
        self.channels.iter().map(|(&c, v)| (c, v.as_slice()))
    }
}

/// Result of [`align_all`](crate::align_all).
///
/// Every value vector of every driver has exactly `grid().len()` entries.
/// Drivers keep the order of the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFrame {
    grid: DistanceGrid,
    drivers: Vec<AlignedDriver>,
}

impl AlignedFrame {
    pub(crate) fn new(grid: DistanceGrid, drivers: Vec<AlignedDriver>) -> Self {
        debug_assert!(drivers
            .iter()
            .all(|d| d.channels.values().all(|v| v.len() == grid.len())));
        Self { grid, drivers }
    }

    /// Return the shared distance grid.
    #[must_use]
    pub fn grid(&self) -> &DistanceGrid {
        &self.grid
    }

    /// Return the aligned drivers in input order.
    #[must_use]
    pub fn drivers(&self) -> &[AlignedDriver] {
        &self.drivers
    }

    /// Look up a driver by label.
    #[must_use]
    pub fn driver(&self, driver: &str) -> Option<&AlignedDriver> {
        self.drivers.iter().find(|d| d.driver == driver)
    }

    /// Return the aligned values of one driver's channel.
    #[must_use]
    pub fn values(&self, driver: &str, channel: Channel) -> Option<&[f64]> {
        self.driver(driver).and_then(|d| d.values(channel))
    }

    /// Return the number of grid points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.grid.len()
    }
}
