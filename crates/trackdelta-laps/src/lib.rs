//! Lap-level analytics for session dashboards.
//!
//! Fastest-lap selection, lap-time evolution, qualifying deltas against pole
//! and gear-map track geometry. Pure computation over already-loaded records.

mod compare;
mod error;
mod gear_map;
mod lap;
mod qualifying;

pub use compare::{LapTimeComparison, LapTimeTrace};
pub use error::LapsError;
pub use gear_map::{GearMap, GearSegment, PositionSample, ViewWindow};
pub use lap::{LapRecord, LapTime, Laps};
pub use qualifying::{format_delta, QualifyingEntry, QualifyingResult};
