//! Session store: the collaborator that owns exported session data.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use trackdelta_align::TelemetrySeries;
use trackdelta_laps::{Laps, PositionSample};

use crate::domain::{DriverCode, SessionKey};
use crate::lap_reader::LapReader;
use crate::reader::TelemetryReader;
use crate::IoError;

/// Source of session data.
///
/// Opened once before any load and closed when the caller is done. Loads on
/// a store that is not open fail with [`IoError::StoreNotOpen`].
pub trait SessionStore {
    /// Prepare the store for loading.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementor.
    fn open(&mut self) -> Result<(), IoError>;

    /// Release the store. Loads fail until it is opened again.
    fn close(&mut self);

    /// Load every lap of the session.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementor.
    fn load_laps(&self, key: &SessionKey) -> Result<Laps, IoError>;

    /// Load one driver's lap telemetry.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementor.
    fn load_telemetry(
        &self,
        key: &SessionKey,
        driver: &DriverCode,
    ) -> Result<TelemetrySeries, IoError>;

    /// Load one driver's track positions.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementor.
    fn load_positions(
        &self,
        key: &SessionKey,
        driver: &DriverCode,
    ) -> Result<Vec<PositionSample>, IoError>;
}

/// A [`SessionStore`] over a directory of CSV exports.
///
/// Layout:
///
/// ```text
/// {root}/
///   2021_monza_R/
///     laps.csv
///     VER.csv
///     HAM.csv
/// ```
///
/// Session directories are named by [`SessionKey::dir_name`]. Each driver
/// file holds that driver's fastest lap, car channels and positions together.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::StoreRootMissing`] | `open` on a root that is not a directory |
/// | [`IoError::StoreNotOpen`] | Load before `open` or after `close` |
/// | [`IoError::SessionNotFound`] | No directory for the session key |
/// | any reader error | See [`LapReader`] and [`TelemetryReader`] |
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    opened: bool,
}

impl DirectoryStore {
    /// Laps file name inside a session directory.
    pub const LAPS_FILE: &'static str = "laps.csv";

    /// Create a closed store rooted at `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            opened: false,
        }
    }

    /// Return whether the store is open.
    pub fn is_open(&self) -> bool {
        self.opened
    }

    fn session_dir(&self, key: &SessionKey) -> Result<PathBuf, IoError> {
        if !self.opened {
            return Err(IoError::StoreNotOpen);
        }
        let dir = self.root.join(key.dir_name());
        if !dir.is_dir() {
            return Err(IoError::SessionNotFound { path: dir });
        }
        Ok(dir)
    }

    fn driver_file(&self, key: &SessionKey, driver: &DriverCode) -> Result<PathBuf, IoError> {
        Ok(self.session_dir(key)?.join(format!("{driver}.csv")))
    }
}

impl SessionStore for DirectoryStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn open(&mut self) -> Result<(), IoError> {
        if !self.root.is_dir() {
            return Err(IoError::StoreRootMissing {
                path: self.root.clone(),
            });
        }
        self.opened = true;
        info!("session store opened");
        Ok(())
    }

    fn close(&mut self) {
        if self.opened {
            debug!(root = %self.root.display(), "session store closed");
        }
        self.opened = false;
    }

    #[instrument(skip(self), fields(session = %key))]
    fn load_laps(&self, key: &SessionKey) -> Result<Laps, IoError> {
        let path = self.session_dir(key)?.join(Self::LAPS_FILE);
        LapReader::new(&path).read()
    }

    #[instrument(skip(self), fields(session = %key, driver = %driver))]
    fn load_telemetry(
        &self,
        key: &SessionKey,
        driver: &DriverCode,
    ) -> Result<TelemetrySeries, IoError> {
        let path = self.driver_file(key, driver)?;
        TelemetryReader::new(&path, driver.clone()).read()
    }

    #[instrument(skip(self), fields(session = %key, driver = %driver))]
    fn load_positions(
        &self,
        key: &SessionKey,
        driver: &DriverCode,
    ) -> Result<Vec<PositionSample>, IoError> {
        let path = self.driver_file(key, driver)?;
        TelemetryReader::new(&path, driver.clone()).read_positions()
    }
}
