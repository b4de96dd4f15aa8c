//! Error types for iplookup.

use thiserror::Error;

/// Error type for iplookup operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Interval insertion rejected
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// Text field cannot be packed
    #[error(transparent)]
    PackedString(#[from] PackedStringError),

    /// Value column cannot take more distinct values
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid IP address
    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// Malformed source record
    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// Source URI scheme is not supported
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// Download error
    #[error("download error: {0}")]
    Download(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for iplookup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for interval index insertions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// The interval end lies before its start
    #[error("interval end must be greater than or equal to the start")]
    InvalidRange,

    /// The interval does not start after the last inserted interval
    #[error("intervals must be inserted in ascending order without overlapping")]
    UnsortedOrOverlapping,
}

/// Error type for value column insertions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnError {
    /// Every dedup key is already in use
    #[error("column is full: {len} distinct values")]
    CapacityExceeded { len: usize },
}

/// Error type for packed string construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackedStringError {
    /// A field has more characters than a 16-bit length marker can describe
    #[error("{field} is too long: {len} characters (max {max})", max = u16::MAX)]
    FieldTooLong { field: &'static str, len: usize },
}
