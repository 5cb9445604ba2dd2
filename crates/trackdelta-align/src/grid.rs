//! Shared distance grid construction.

use tracing::{debug, instrument};

use crate::error::AlignError;
use crate::series::TelemetrySeries;

/// Upper bound on grid size; protects against a near-zero spacing.
const MAX_GRID_POINTS: usize = 1_000_000;

/// Which part of the input distance ranges the grid covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSpan {
    /// Only distances covered by every series (default).
    #[default]
    Intersection,
    /// Distances covered by any series; the others are clamped at their ends.
    Union,
}

/// How densely the grid samples its span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridResolution {
    /// A fixed number of evenly spaced points, both ends included.
    Points(usize),
    /// One point every given number of meters from the start; the end is always included.
    Spacing(f64),
}

impl Default for GridResolution {
    fn default() -> Self {
        GridResolution::Points(GridConfig::DEFAULT_POINTS)
    }
}

/// Configuration for [`build_grid`].
///
/// # Defaults
///
/// | Parameter    | Default                   |
/// |--------------|---------------------------|
/// | `resolution` | `GridResolution::Points(500)` |
/// | `span`       | `GridSpan::Intersection`  |
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridConfig {
    pub(crate) resolution: GridResolution,
    pub(crate) span: GridSpan,
}

impl GridConfig {
    /// Default number of grid points per lap.
    pub const DEFAULT_POINTS: usize = 500;

    /// Create a configuration with default resolution and span.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: GridResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the span policy.
    #[must_use]
    pub fn with_span(mut self, span: GridSpan) -> Self {
        self.span = span;
        self
    }

    /// Return the configured resolution.
    #[must_use]
    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }

    /// Return the configured span policy.
    #[must_use]
    pub fn span(&self) -> GridSpan {
        self.span
    }
}

/// Strictly increasing, finite distance points shared by every aligned series.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGrid(Vec<f64>);

impl DistanceGrid {
    /// Wrap caller-supplied grid points.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::InvalidGrid`] if there are fewer than two points,
    /// or a point is non-finite or not greater than its predecessor.
    pub fn from_points(points: Vec<f64>) -> Result<Self, AlignError> {
        if points.len() < 2 {
            return Err(AlignError::InvalidGrid { index: 0 });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(AlignError::InvalidGrid { index });
        }
        if let Some(index) = (1..points.len()).find(|&i| points[i] <= points[i - 1]) {
            return Err(AlignError::InvalidGrid { index });
        }
        Ok(Self(points))
    }

    /// Return the grid points.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Return the number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed grid; provided for `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the first grid distance.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.0[0]
    }

    /// Return the last grid distance.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.0[self.0.len() - 1]
    }
}

/// Build the shared distance grid for a set of series.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::EmptySeriesList`] | `series` is empty |
/// | [`AlignError::InsufficientData`] | A series has fewer than 2 distinct distances |
/// | [`AlignError::DisjointRanges`] | `GridSpan::Intersection` and the ranges do not overlap |
/// | [`AlignError::InvalidResolution`] | Fewer than 2 points, or a non-positive or too-fine spacing |
#[instrument(skip_all, fields(n_series = series.len()))]
pub fn build_grid(
    series: &[TelemetrySeries],
    config: &GridConfig,
) -> Result<DistanceGrid, AlignError> {
    if series.is_empty() {
        return Err(AlignError::EmptySeriesList);
    }

    let mut lo = f64::NEG_INFINITY;
    let mut hi = f64::INFINITY;
    if config.span == GridSpan::Union {
        lo = f64::INFINITY;
        hi = f64::NEG_INFINITY;
    }
    for s in series {
        s.ensure_resamplable()?;
        // ensure_resamplable guarantees at least two samples
        let Some((first, last)) = s.distance_range() else {
            continue;
        };
        match config.span {
            GridSpan::Intersection => {
                lo = lo.max(first);
                hi = hi.min(last);
            }
            GridSpan::Union => {
                lo = lo.min(first);
                hi = hi.max(last);
            }
        }
    }

    if lo >= hi {
        return Err(AlignError::DisjointRanges { lo, hi });
    }

    let points = match config.resolution {
        GridResolution::Points(n) => linspace(lo, hi, n)?,
        GridResolution::Spacing(spacing) => stepped(lo, hi, spacing)?,
    };
    debug!(lo, hi, n_points = points.len(), "grid built");

    DistanceGrid::from_points(points).map_err(|_| AlignError::InvalidResolution {
        reason: format!("resolution too fine for span [{lo}, {hi}]"),
    })
}

fn linspace(lo: f64, hi: f64, n: usize) -> Result<Vec<f64>, AlignError> {
    if n < 2 {
        return Err(AlignError::InvalidResolution {
            reason: format!("need at least 2 points, got {n}"),
        });
    }
    if n > MAX_GRID_POINTS {
        return Err(AlignError::InvalidResolution {
            reason: format!("{n} points exceeds the limit of {MAX_GRID_POINTS}"),
        });
    }
    let step = (hi - lo) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n - 1).map(|i| lo + step * i as f64).collect();
    points.push(hi);
    Ok(points)
}

fn stepped(lo: f64, hi: f64, spacing: f64) -> Result<Vec<f64>, AlignError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(AlignError::InvalidResolution {
            reason: format!("spacing must be a positive number of meters, got {spacing}"),
        });
    }
    let n_steps = ((hi - lo) / spacing).floor();
    if n_steps + 2.0 > MAX_GRID_POINTS as f64 {
        return Err(AlignError::InvalidResolution {
            reason: format!("spacing {spacing} m yields more than {MAX_GRID_POINTS} points"),
        });
    }
    let n_steps = n_steps as usize;
    let mut points: Vec<f64> = (0..=n_steps)
        .map(|i| lo + spacing * i as f64)
        .take_while(|&p| p < hi)
        .collect();
    points.push(hi);
    Ok(points)
}
