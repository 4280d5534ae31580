//! Error types for the helios-time crate.

/// Error type for all fallible operations in the helios-time crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeError {
    /// Returned when a value vector is too short to resample.
    #[error("insufficient data: {len} value(s), need at least {min}")]
    InsufficientData {
        /// Number of values provided.
        len: usize,
        /// Minimum number of values required.
        min: usize,
    },

    /// Returned when a target time point falls outside the source span and
    /// extrapolation is disabled.
    #[error(
        "target time points are outside the source time points, \
         use an extrapolation type other than None"
    )]
    TargetOutsideSource,

    /// Returned when a time grid is empty.
    #[error("time points must not be empty")]
    EmptyTimePoints,

    /// Returned when a time grid is not strictly increasing.
    #[error("time points must be strictly increasing")]
    UnsortedTimePoints,

    /// Returned when a value vector does not match its time grid.
    #[error("values length {values} does not match time grid value count {expected}")]
    ValuesLengthMismatch {
        /// Length of the value vector.
        values: usize,
        /// Value count implied by the grid.
        expected: usize,
    },

    /// Returned when parsing an unknown timeseries type string.
    #[error("unknown timeseries type '{value}'")]
    UnknownTimeseriesType {
        /// The unrecognised type string.
        value: String,
    },
}
