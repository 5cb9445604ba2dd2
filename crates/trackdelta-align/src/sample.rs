//! A single recorded telemetry instant.

use crate::channel::Channel;

/// One recorded instant for one driver-lap.
///
/// Channel values are optional; `None` and NaN are both treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetrySample {
    /// Meters along the lap from the start/finish line.
    pub distance: f64,
    /// Speed in km/h.
    pub speed: Option<f64>,
    /// Engine RPM.
    pub rpm: Option<f64>,
    /// Throttle position, 0–100.
    pub throttle: Option<f64>,
    /// Brake, 0/1 or 0–100.
    pub brake: Option<f64>,
    /// Selected gear.
    pub gear: Option<f64>,
    /// DRS flag.
    pub drs: Option<f64>,
    /// Seconds since the start of the lap.
    pub timestamp: Option<f64>,
}

impl TelemetrySample {
    /// Create a sample at `distance` with every channel missing.
    #[must_use]
    pub fn at(distance: f64) -> Self {
        Self {
            distance,
            ..Self::default()
        }
    }

    /// Set a channel value, returning the updated sample.
    #[must_use]
    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        *self.slot_mut(channel) = Some(value);
        self
    }

    /// Set the timestamp, returning the updated sample.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Return the known value of `channel`, or `None` if it is absent or NaN.
    #[must_use]
    pub fn value(&self, channel: Channel) -> Option<f64> {
        let raw = match channel {
            Channel::Speed => self.speed,
            Channel::Rpm => self.rpm,
            Channel::Throttle => self.throttle,
            Channel::Brake => self.brake,
            Channel::Gear => self.gear,
            Channel::Drs => self.drs,
        };
        raw.filter(|v| !v.is_nan())
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut Option<f64> {
        match channel {
            Channel::Speed => &mut self.speed,
            Channel::Rpm => &mut self.rpm,
            Channel::Throttle => &mut self.throttle,
            Channel::Brake => &mut self.brake,
            Channel::Gear => &mut self.gear,
            Channel::Drs => &mut self.drs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_reads_as_missing() {
        let sample = TelemetrySample::at(10.0).with(Channel::Speed, f64::NAN);
        assert_eq!(sample.value(Channel::Speed), None);
    }

    #[test]
    fn builder_sets_channels() {
        let sample = TelemetrySample::at(5.0)
            .with(Channel::Gear, 4.0)
            .with(Channel::Rpm, 11_000.0)
            .with_timestamp(0.25);
        assert_eq!(sample.value(Channel::Gear), Some(4.0));
        assert_eq!(sample.value(Channel::Rpm), Some(11_000.0));
        assert_eq!(sample.value(Channel::Throttle), None);
        assert_eq!(sample.timestamp, Some(0.25));
    }
}
