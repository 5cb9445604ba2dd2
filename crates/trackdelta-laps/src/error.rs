//! Error types for lap analytics.

/// Errors from lap selection, comparison and gear map construction.
#[derive(Debug, thiserror::Error)]
pub enum LapsError {
    /// Returned when a requested driver has no laps in the session.
    #[error("no laps recorded for driver {driver}")]
    UnknownDriver {
        /// The requested driver code.
        driver: String,
    },

    /// Returned when no driver in the session has a timed lap.
    #[error("no valid fastest laps found for any driver")]
    NoValidLaps,

    /// Returned when a gear map is built from fewer than two positions.
    #[error("gear map needs at least 2 positions, got {n}")]
    InsufficientPositions {
        /// Number of positions provided.
        n: usize,
    },

    /// Returned when a position coordinate is NaN or infinite.
    #[error("non-finite track position at sample {index}")]
    NonFinitePosition {
        /// Index of the offending position.
        index: usize,
    },
}
