//! Distance alignment of per-driver telemetry.
//!
//! Pure math library with no I/O. Collapses irregular, duplicated and gappy
//! sensor streams onto a shared lap-distance grid so that two drivers can be
//! compared point by point. Continuous channels are linearly interpolated,
//! discrete channels are step-held, and grid points outside a series' range
//! are clamped to its boundary values.

mod align;
mod channel;
mod error;
mod frame;
mod grid;
mod integrate;
mod interpolate;
mod sample;
mod series;

pub use align::{align_all, align_channel};
pub use channel::{Channel, ChannelKind};
pub use error::{AlignError, IntegrateError};
pub use frame::{AlignedDriver, AlignedFrame};
pub use grid::{build_grid, DistanceGrid, GridConfig, GridResolution, GridSpan};
pub use integrate::integrate_distance;
pub use sample::TelemetrySample;
pub use series::TelemetrySeries;
