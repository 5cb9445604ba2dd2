//! Channel alignment onto a shared distance grid.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use crate::channel::{Channel, ChannelKind};
use crate::error::AlignError;
use crate::frame::{AlignedDriver, AlignedFrame};
use crate::grid::{build_grid, DistanceGrid, GridConfig};
use crate::interpolate::{resample_linear, resample_step};
use crate::series::TelemetrySeries;

/// Resample one channel of `series` onto `grid`.
///
/// Continuous channels are linearly interpolated between the two nearest
/// known samples; discrete channels hold the last known value at or before
/// each grid point. Grid points outside the known range take the nearest
/// boundary value. Missing and NaN samples are dropped before resampling.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::InsufficientData`] | `series` has fewer than 2 distinct distances |
/// | [`AlignError::MissingChannel`] | No sample carries a value for `channel` |
pub fn align_channel(
    series: &TelemetrySeries,
    grid: &DistanceGrid,
    channel: Channel,
) -> Result<Vec<f64>, AlignError> {
    series.ensure_resamplable()?;
    let known = series.known_points(channel)?;
    let (xs, ys) = (&known.distances, &known.values);
    let values = match channel.kind() {
        ChannelKind::Continuous => resample_linear(xs, ys, grid.as_slice()),
        ChannelKind::Discrete => resample_step(xs, ys, grid.as_slice()),
    };
    Ok(values)
}

/// Build a shared grid for `series` and align every requested channel onto it.
///
/// Channels requested more than once are aligned once. The call either
/// succeeds for every driver and channel or returns the first error.
///
/// # Errors
///
/// Any error from [`build_grid`] or [`align_channel`].
#[instrument(skip_all, fields(n_series = series.len(), n_channels = channels.len()))]
pub fn align_all(
    series: &[TelemetrySeries],
    channels: &[Channel],
    config: &GridConfig,
) -> Result<AlignedFrame, AlignError> {
    let grid = build_grid(series, config)?;

    let mut drivers = Vec::with_capacity(series.len());
    for s in series {
        let mut aligned = BTreeMap::new();
        for &channel in channels {
            if aligned.contains_key(&channel) {
                continue;
            }
            aligned.insert(channel, align_channel(s, &grid, channel)?);
        }
        debug!(driver = s.driver(), n_samples = s.len(), "driver aligned");
        drivers.push(AlignedDriver::new(s.driver().to_string(), aligned));
    }

    info!(
        n_drivers = drivers.len(),
        n_points = grid.len(),
        start = grid.start(),
        end = grid.end(),
        "alignment complete"
    );
    Ok(AlignedFrame::new(grid, drivers))
}
