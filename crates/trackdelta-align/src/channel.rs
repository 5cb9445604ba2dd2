//! Telemetry channel selectors.

use std::fmt;
use std::str::FromStr;

use crate::error::AlignError;

/// How a channel is resampled onto the distance grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Linearly interpolated between neighbouring samples.
    Continuous,
    /// Step-held: the last known value at or before the grid point.
    Discrete,
}

/// A car-sensor channel that can be aligned onto a distance grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Speed in km/h.
    Speed,
    /// Engine revolutions per minute.
    Rpm,
    /// Throttle pedal position, 0–100.
    Throttle,
    /// Brake pedal, 0/1 or 0–100.
    Brake,
    /// Selected gear.
    Gear,
    /// DRS flag.
    Drs,
}

impl Channel {
    /// All channels in dashboard order.
    pub const ALL: [Channel; 6] = [
        Channel::Rpm,
        Channel::Speed,
        Channel::Throttle,
        Channel::Brake,
        Channel::Gear,
        Channel::Drs,
    ];

    /// Return the resampling kind for this channel.
    ///
    /// Gear, DRS and brake are on/off or integral states; a linear blend
    /// between them (gear 3.5) has no physical meaning.
    #[must_use]
    pub fn kind(self) -> ChannelKind {
        match self {
            Channel::Speed | Channel::Rpm | Channel::Throttle => ChannelKind::Continuous,
            Channel::Brake | Channel::Gear | Channel::Drs => ChannelKind::Discrete,
        }
    }

    /// Return the canonical lower-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Speed => "speed",
            Channel::Rpm => "rpm",
            Channel::Throttle => "throttle",
            Channel::Brake => "brake",
            Channel::Gear => "gear",
            Channel::Drs => "drs",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = AlignError;

    /// Parse a channel name, case-insensitively. FastF1 column names
    /// (`Speed`, `RPM`, `nGear`, `DRS`, ...) are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::UnknownChannel`] for any other name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speed" => Ok(Channel::Speed),
            "rpm" => Ok(Channel::Rpm),
            "throttle" => Ok(Channel::Throttle),
            "brake" => Ok(Channel::Brake),
            "gear" | "ngear" => Ok(Channel::Gear),
            "drs" => Ok(Channel::Drs),
            _ => Err(AlignError::UnknownChannel { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fastf1_column_names() {
        assert_eq!("nGear".parse::<Channel>().unwrap(), Channel::Gear);
        assert_eq!("RPM".parse::<Channel>().unwrap(), Channel::Rpm);
        assert_eq!("DRS".parse::<Channel>().unwrap(), Channel::Drs);
        assert_eq!(" Speed ".parse::<Channel>().unwrap(), Channel::Speed);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "tyre_temp".parse::<Channel>().unwrap_err();
        assert!(matches!(err, AlignError::UnknownChannel { ref name } if name == "tyre_temp"));
    }

    #[test]
    fn discrete_channels() {
        assert_eq!(Channel::Gear.kind(), ChannelKind::Discrete);
        assert_eq!(Channel::Drs.kind(), ChannelKind::Discrete);
        assert_eq!(Channel::Brake.kind(), ChannelKind::Discrete);
        assert_eq!(Channel::Speed.kind(), ChannelKind::Continuous);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for channel in Channel::ALL {
            assert_eq!(channel.to_string().parse::<Channel>().unwrap(), channel);
        }
    }
}
