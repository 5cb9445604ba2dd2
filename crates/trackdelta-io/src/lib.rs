//! Session data I/O for trackdelta.
//!
//! CSV readers for telemetry and lap exports, the session store collaborator
//! that owns the on-disk export directory, session configuration with default
//! driver selection, and the JSON report writer.

mod columns;
mod config;
mod domain;
mod duration;
mod error;
mod lap_reader;
mod reader;
mod store;
mod writer;

pub use config::SessionConfig;
pub use domain::{DriverCode, ReportName, SessionCode, SessionKey};
pub use duration::parse_seconds;
pub use error::IoError;
pub use lap_reader::LapReader;
pub use reader::TelemetryReader;
pub use store::{DirectoryStore, SessionStore};
pub use writer::ReportWriter;
