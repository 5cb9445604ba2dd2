//! Session selection and analysis parameters.

use tracing::{debug, warn};
use trackdelta_align::{Channel, GridConfig};

use crate::domain::{DriverCode, SessionCode, SessionKey};
use crate::IoError;

/// What to load and how to align it.
///
/// Defaults select the 2021 Monza race, the first two drivers of the session
/// in code order, a 500-point intersection grid and every channel.
///
/// ```
/// use trackdelta_io::{DriverCode, SessionCode, SessionConfig};
///
/// let config = SessionConfig::new()
///     .with_year(2021)
///     .with_event("Abu Dhabi")
///     .with_session(SessionCode::Qualifying)
///     .with_driver1(DriverCode::new("VER").unwrap());
/// assert_eq!(config.key().dir_name(), "2021_abu_dhabi_Q");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub(crate) year: u16,
    pub(crate) event: String,
    pub(crate) session: SessionCode,
    pub(crate) driver1: Option<DriverCode>,
    pub(crate) driver2: Option<DriverCode>,
    pub(crate) grid: GridConfig,
    pub(crate) channels: Vec<Channel>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            year: Self::DEFAULT_YEAR,
            event: Self::DEFAULT_EVENT.to_string(),
            session: SessionCode::default(),
            driver1: None,
            driver2: None,
            grid: GridConfig::default(),
            channels: Channel::ALL.to_vec(),
        }
    }
}

impl SessionConfig {
    /// Season loaded when none is given.
    pub const DEFAULT_YEAR: u16 = 2021;
    /// Event loaded when none is given.
    pub const DEFAULT_EVENT: &'static str = "Monza";

    /// Create a config with the defaults described on [`SessionConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the championship year.
    #[must_use]
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    /// Set the event name.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Set the session type.
    #[must_use]
    pub fn with_session(mut self, session: SessionCode) -> Self {
        self.session = session;
        self
    }

    /// Request the first driver.
    #[must_use]
    pub fn with_driver1(mut self, driver: DriverCode) -> Self {
        self.driver1 = Some(driver);
        self
    }

    /// Request the second driver.
    #[must_use]
    pub fn with_driver2(mut self, driver: DriverCode) -> Self {
        self.driver2 = Some(driver);
        self
    }

    /// Set the alignment grid.
    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Set the channels to align. An empty list keeps all channels.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = if channels.is_empty() {
            Channel::ALL.to_vec()
        } else {
            channels
        };
        self
    }

    /// Return the championship year.
    #[must_use]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Return the event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Return the session type.
    #[must_use]
    pub fn session(&self) -> SessionCode {
        self.session
    }

    /// Return the alignment grid configuration.
    #[must_use]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Return the channels to align.
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Key of the selected session in a store.
    #[must_use]
    pub fn key(&self) -> SessionKey {
        SessionKey {
            year: self.year,
            event: self.event.clone(),
            session: self.session,
        }
    }

    /// Pick the two drivers to compare from those present in the session.
    ///
    /// `available` is sorted first. Without a request, driver 1 is the first
    /// code and driver 2 the second (or the first again when only one driver
    /// ran). A requested code not present in the session falls back to the
    /// same default with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NoDrivers`] if `available` is empty.
    pub fn resolve_drivers(
        &self,
        available: &[DriverCode],
    ) -> Result<(DriverCode, DriverCode), IoError> {
        let mut sorted = available.to_vec();
        sorted.sort();
        sorted.dedup();

        let first = sorted.first().ok_or(IoError::NoDrivers)?;
        let second = sorted.get(1).unwrap_or(first);

        let pick = |requested: &Option<DriverCode>, fallback: &DriverCode| match requested {
            Some(code) if sorted.contains(code) => code.clone(),
            Some(code) => {
                warn!(
                    requested = %code,
                    fallback = %fallback,
                    "driver not in session, using default"
                );
                fallback.clone()
            }
            None => fallback.clone(),
        };

        let d1 = pick(&self.driver1, first);
        let d2 = pick(&self.driver2, second);
        debug!(driver1 = %d1, driver2 = %d2, "drivers resolved");
        Ok((d1, d2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackdelta_align::{GridResolution, GridSpan};

    fn codes(list: &[&str]) -> Vec<DriverCode> {
        list.iter().map(|c| DriverCode::new(c).unwrap()).collect()
    }

    fn code(c: &str) -> DriverCode {
        DriverCode::new(c).unwrap()
    }

    #[test]
    fn defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.year(), 2021);
        assert_eq!(config.event(), "Monza");
        assert_eq!(config.session(), SessionCode::Race);
        assert_eq!(config.channels(), Channel::ALL.as_slice());
        assert_eq!(config.grid().resolution(), GridResolution::Points(500));
        assert_eq!(config.key().dir_name(), "2021_monza_R");
    }

    #[test]
    fn builders_set_fields() {
        let grid = GridConfig::new().with_span(GridSpan::Union);
        let config = SessionConfig::new()
            .with_year(2023)
            .with_event("Spa")
            .with_session(SessionCode::Sprint)
            .with_grid(grid)
            .with_channels(vec![Channel::Speed]);
        assert_eq!(config.key().dir_name(), "2023_spa_S");
        assert_eq!(config.grid().span(), GridSpan::Union);
        assert_eq!(config.channels(), &[Channel::Speed]);
    }

    #[test]
    fn empty_channel_list_keeps_all() {
        let config = SessionConfig::new().with_channels(Vec::new());
        assert_eq!(config.channels().len(), Channel::ALL.len());
    }

    #[test]
    fn default_drivers_are_first_two_sorted() {
        let config = SessionConfig::new();
        let (d1, d2) = config.resolve_drivers(&codes(&["VER", "HAM", "BOT"])).unwrap();
        assert_eq!(d1.as_str(), "BOT");
        assert_eq!(d2.as_str(), "HAM");
    }

    #[test]
    fn single_driver_is_used_twice() {
        let (d1, d2) = SessionConfig::new().resolve_drivers(&codes(&["VER"])).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn requested_drivers_are_kept() {
        let config = SessionConfig::new().with_driver1(code("VER")).with_driver2(code("HAM"));
        let (d1, d2) = config.resolve_drivers(&codes(&["BOT", "HAM", "VER"])).unwrap();
        assert_eq!((d1.as_str(), d2.as_str()), ("VER", "HAM"));
    }

    #[test]
    fn unknown_request_falls_back() {
        let config = SessionConfig::new().with_driver1(code("XXX"));
        let (d1, _) = config.resolve_drivers(&codes(&["HAM", "VER"])).unwrap();
        assert_eq!(d1.as_str(), "HAM");
    }

    #[test]
    fn no_drivers() {
        let result = SessionConfig::new().resolve_drivers(&[]);
        assert!(matches!(result, Err(IoError::NoDrivers)));
    }
}
