//! Error types for grid construction, channel alignment and distance integration.

use crate::channel::Channel;

/// Errors from building a distance grid or aligning channels onto it.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Returned when `build_grid` or `align_all` is called with no series.
    #[error("at least one telemetry series is required")]
    EmptySeriesList,

    /// Returned when a series has fewer than two distinct distances.
    #[error("series for {driver} has {n_distinct} distinct distance(s), need at least 2")]
    InsufficientData {
        /// Driver label of the offending series.
        driver: String,
        /// Number of distinct distances after collapsing duplicates.
        n_distinct: usize,
    },

    /// Returned when a channel name does not match any known channel.
    #[error("unknown channel \"{name}\" (expected speed, rpm, throttle, brake, gear or drs)")]
    UnknownChannel {
        /// The name that failed to parse.
        name: String,
    },

    /// Returned when no sample of a series carries a value for the channel.
    #[error("series for {driver} has no {channel} values")]
    MissingChannel {
        /// Driver label of the offending series.
        driver: String,
        /// The requested channel.
        channel: Channel,
    },

    /// Returned when distance decreases between consecutive samples.
    #[error("distance decreases in series for {driver} at sample {index}: {previous} -> {current}")]
    NonMonotonicDistance {
        /// Driver label of the offending series.
        driver: String,
        /// Index of the sample whose distance is lower than its predecessor.
        index: usize,
        /// Distance of the preceding sample.
        previous: f64,
        /// Distance of the offending sample.
        current: f64,
    },

    /// Returned when a sample distance is NaN or infinite.
    #[error("non-finite distance in series for {driver} at sample {index}")]
    NonFiniteDistance {
        /// Driver label of the offending series.
        driver: String,
        /// Index of the first non-finite distance.
        index: usize,
    },

    /// Returned when the grid span policy is `Intersection` and the series do not overlap.
    #[error("series distance ranges do not overlap (intersection [{lo}, {hi}] is empty)")]
    DisjointRanges {
        /// Largest series start distance.
        lo: f64,
        /// Smallest series end distance.
        hi: f64,
    },

    /// Returned when the grid resolution cannot produce a valid grid.
    #[error("invalid grid resolution: {reason}")]
    InvalidResolution {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Returned when a caller-supplied grid is too short, non-finite or not strictly increasing.
    #[error("invalid distance grid at index {index}")]
    InvalidGrid {
        /// Index of the first offending point (0 when the grid is too short).
        index: usize,
    },
}

/// Errors from integrating lap distance out of speed and timestamps.
#[derive(Debug, thiserror::Error)]
pub enum IntegrateError {
    /// Returned when a sample has no timestamp.
    #[error("sample {index} has no timestamp")]
    MissingTimestamp {
        /// Index of the offending sample.
        index: usize,
    },

    /// Returned when a sample has no speed value.
    #[error("sample {index} has no speed value")]
    MissingSpeed {
        /// Index of the offending sample.
        index: usize,
    },

    /// Returned when a timestamp is earlier than its predecessor.
    #[error("timestamp decreases at sample {index}")]
    NonMonotonicTimestamp {
        /// Index of the offending sample.
        index: usize,
    },
}
