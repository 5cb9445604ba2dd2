//! Track outline segments coloured by gear.

use tracing::{debug, instrument};

use crate::error::LapsError;

/// A track position from the provider's position feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Track x coordinate.
    pub x: f64,
    /// Track y coordinate.
    pub y: f64,
    /// Gear at this position, if known.
    pub gear: Option<f64>,
}

/// One straight piece of the outline between two consecutive positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearSegment {
    /// Start point `(x, y)`.
    pub start: (f64, f64),
    /// End point `(x, y)`.
    pub end: (f64, f64),
    /// Gear at the start point.
    pub gear: Option<f64>,
}

/// Square plotting window centred on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

/// Gear map of a lap: `n - 1` segments for `n` positions.
#[derive(Debug, Clone, PartialEq)]
pub struct GearMap {
    segments: Vec<GearSegment>,
    bounds: ViewWindow,
}

impl GearMap {
    /// Default padding on each side of the view, as a fraction of the track span.
    pub const DEFAULT_PAD_FRACTION: f64 = 0.04;

    /// Build segments from consecutive positions.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LapsError::InsufficientPositions`] | Fewer than 2 positions |
    /// | [`LapsError::NonFinitePosition`] | A coordinate is NaN or infinite |
    #[instrument(skip_all, fields(n = positions.len()))]
    pub fn from_positions(positions: &[PositionSample]) -> Result<Self, LapsError> {
        if positions.len() < 2 {
            return Err(LapsError::InsufficientPositions { n: positions.len() });
        }
        if let Some(index) = positions
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(LapsError::NonFinitePosition { index });
        }

        let segments: Vec<GearSegment> = positions
            .windows(2)
            .map(|w| GearSegment {
                start: (w[0].x, w[0].y),
                end: (w[1].x, w[1].y),
                gear: w[0].gear.filter(|g| g.is_finite()),
            })
            .collect();

        let mut bounds = ViewWindow {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for p in positions {
            bounds.x_min = bounds.x_min.min(p.x);
            bounds.x_max = bounds.x_max.max(p.x);
            bounds.y_min = bounds.y_min.min(p.y);
            bounds.y_max = bounds.y_max.max(p.y);
        }
        debug!(n_segments = segments.len(), "gear map built");

        Ok(Self { segments, bounds })
    }

    /// Return the segments in lap order.
    #[must_use]
    pub fn segments(&self) -> &[GearSegment] {
        &self.segments
    }

    /// Return `(min, max)` of the known segment gears, for colour normalisation.
    #[must_use]
    pub fn gear_range(&self) -> Option<(f64, f64)> {
        self.segments
            .iter()
            .filter_map(|s| s.gear)
            .fold(None, |acc, g| match acc {
                None => Some((g, g)),
                Some((lo, hi)) => Some((lo.min(g), hi.max(g))),
            })
    }

    /// Square window centred on the track, spanning the larger of the x and y
    /// ranges plus `pad_fraction * span` on every side.
    ///
    /// A degenerate track (all positions equal) gets a padding of 1.0.
    #[must_use]
    pub fn view_window(&self, pad_fraction: f64) -> ViewWindow {
        let b = self.bounds;
        let span = (b.x_max - b.x_min).max(b.y_max - b.y_min);
        let pad = if span > 0.0 { span * pad_fraction } else { 1.0 };
        let x_mid = (b.x_max + b.x_min) / 2.0;
        let y_mid = (b.y_max + b.y_min) / 2.0;
        let half = span / 2.0 + pad;
        ViewWindow {
            x_min: x_mid - half,
            x_max: x_mid + half,
            y_min: y_mid - half,
            y_max: y_mid + half,
        }
    }
}
