//! Per-driver telemetry series with distance validation.

use crate::channel::Channel;
use crate::error::AlignError;
use crate::sample::TelemetrySample;

/// Ordered telemetry samples for one driver on one lap.
///
/// Distances are guaranteed finite and non-decreasing. Duplicates are allowed
/// and collapsed keep-first wherever the series is resampled.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySeries {
    driver: String,
    samples: Vec<TelemetrySample>,
}

/// Known `(distance, value)` pairs of one channel, duplicates collapsed keep-first.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KnownPoints {
    pub(crate) distances: Vec<f64>,
    pub(crate) values: Vec<f64>,
}

impl TelemetrySeries {
    /// Create a new series, validating sample distances.
    ///
    /// An empty or single-sample series is accepted here; alignment rejects
    /// it later with [`AlignError::InsufficientData`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::NonFiniteDistance`] | A distance is NaN or infinite |
    /// | [`AlignError::NonMonotonicDistance`] | A distance is lower than the one before it |
    pub fn new(
        driver: impl Into<String>,
        samples: Vec<TelemetrySample>,
    ) -> Result<Self, AlignError> {
        let driver = driver.into();
        if let Some(index) = samples.iter().position(|s| !s.distance.is_finite()) {
            return Err(AlignError::NonFiniteDistance { driver, index });
        }
        let decreasing =
            (1..samples.len()).find(|&i| samples[i].distance < samples[i - 1].distance);
        if let Some(index) = decreasing {
            return Err(AlignError::NonMonotonicDistance {
                previous: samples[index - 1].distance,
                current: samples[index].distance,
                driver,
                index,
            });
        }
        Ok(Self { driver, samples })
    }

    /// Return the driver label.
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Return the raw samples.
    #[must_use]
    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// Return the number of raw samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return true if the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Return the distinct sample distances, duplicates collapsed keep-first.
    #[must_use]
    pub fn distinct_distances(&self) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            if out.last() != Some(&sample.distance) {
                out.push(sample.distance);
            }
        }
        out
    }

    /// Return the `(first, last)` distance covered by the series.
    #[must_use]
    pub fn distance_range(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.distance, last.distance)),
            _ => None,
        }
    }

    /// Fail unless the series spans at least two distinct distances.
    pub(crate) fn ensure_resamplable(&self) -> Result<(), AlignError> {
        let n_distinct = self.distinct_distances().len();
        if n_distinct < 2 {
            return Err(AlignError::InsufficientData {
                driver: self.driver.clone(),
                n_distinct,
            });
        }
        Ok(())
    }

    /// Collect the known points of `channel`.
    ///
    /// Missing samples are dropped first, then the first known value at each
    /// distance wins.
    pub(crate) fn known_points(&self, channel: Channel) -> Result<KnownPoints, AlignError> {
        let mut distances: Vec<f64> = Vec::with_capacity(self.samples.len());
        let mut values = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            let Some(value) = sample.value(channel) else {
                continue;
            };
            if distances.last() == Some(&sample.distance) {
                continue;
            }
            distances.push(sample.distance);
            values.push(value);
        }
        if values.is_empty() {
            return Err(AlignError::MissingChannel {
                driver: self.driver.clone(),
                channel,
            });
        }
        Ok(KnownPoints { distances, values })
    }
}
