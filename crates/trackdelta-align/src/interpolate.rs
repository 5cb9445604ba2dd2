//! Resampling of known points onto a sorted grid.
//!
//! Both resamplers walk the grid and the known points together in a single
//! pass. Known distances must be strictly increasing and non-empty; grid
//! points must be sorted ascending.

/// Index of the last known point at or before `target`, starting the search at `idx`.
///
/// Returns 0 when `target` lies before the first known point.
fn advance(xs: &[f64], mut idx: usize, target: f64) -> usize {
    while idx + 1 < xs.len() && xs[idx + 1] <= target {
        idx += 1;
    }
    idx
}

/// Linearly interpolate `(xs, ys)` at every grid point, clamping outside `[xs[0], xs[n-1]]`.
///
/// Grid points that coincide with a known distance return that point's value exactly.
pub(crate) fn resample_linear(xs: &[f64], ys: &[f64], grid: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(!xs.is_empty());

    let mut out = Vec::with_capacity(grid.len());
    let mut idx = 0;
    for &target in grid {
        idx = advance(xs, idx, target);
        let (x0, y0) = (xs[idx], ys[idx]);
        if target <= x0 || idx + 1 == xs.len() {
            out.push(y0);
            continue;
        }
        let (x1, y1) = (xs[idx + 1], ys[idx + 1]);
        let frac = ((target - x0) / (x1 - x0)).clamp(0.0, 1.0);
        out.push(y0 + (y1 - y0) * frac);
    }
    out
}

/// Step-hold `(xs, ys)` at every grid point: the value of the last known point
/// at or before the grid point, or the first value before the series starts.
pub(crate) fn resample_step(xs: &[f64], ys: &[f64], grid: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(!xs.is_empty());

    let mut out = Vec::with_capacity(grid.len());
    let mut idx = 0;
    for &target in grid {
        idx = advance(xs, idx, target);
        out.push(ys[idx]);
    }
    out
}
