//! I/O error types for trackdelta-io.

use std::path::PathBuf;

use trackdelta_align::{AlignError, IntegrateError};

/// Errors from CSV reading, session lookup, configuration and report writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a required column is absent from the header.
    #[error("missing column \"{column}\" in {path}")]
    MissingColumn {
        /// Path to the CSV file.
        path: PathBuf,
        /// Name of the required column.
        column: &'static str,
    },

    /// Returned when a cell cannot be parsed or holds an infinite value.
    #[error("invalid value in {path}: row {row_index}, column {column}, raw value \"{raw}\"")]
    InvalidValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Column name.
        column: &'static str,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when the decoded samples do not form a valid series.
    #[error("invalid telemetry series in {path}")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying validation error.
        source: AlignError,
    },

    /// Returned when lap distance cannot be integrated from speed and time.
    #[error("cannot derive distance for {path}")]
    DistanceIntegration {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying integration error.
        source: IntegrateError,
    },

    /// Returned when a driver code is empty or not ASCII alphanumeric.
    #[error("invalid driver code \"{code}\": must match [A-Za-z0-9]+")]
    InvalidDriverCode {
        /// The invalid code.
        code: String,
    },

    /// Returned when a session code is not one of R, Q, S, SQ, FP1, FP2, FP3.
    #[error("invalid session code \"{code}\" (expected R, Q, S, SQ, FP1, FP2 or FP3)")]
    InvalidSessionCode {
        /// The invalid code.
        code: String,
    },

    /// Returned when the report name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid report name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidReportName {
        /// The invalid name.
        name: String,
    },

    /// Returned when a session has no drivers to choose from.
    #[error("no drivers available in session")]
    NoDrivers,

    /// Returned when the store root directory does not exist.
    #[error("session store root not found: {path}")]
    StoreRootMissing {
        /// Configured root directory.
        path: PathBuf,
    },

    /// Returned when data is requested from a store that has not been opened.
    #[error("session store is not open")]
    StoreNotOpen,

    /// Returned when the session directory is absent from the store.
    #[error("session not found in store: {path}")]
    SessionNotFound {
        /// Expected session directory.
        path: PathBuf,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
