//! Enumerations controlling timeseries conversion.

use std::fmt;
use std::str::FromStr;

use crate::error::TimeError;

/// Convention of a timeseries: instantaneous samples or interval averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeseriesType {
    /// Each time point carries an instantaneous value.
    Point,
    /// Each value is the average over the interval starting at its time point.
    Average,
}

impl TimeseriesType {
    /// The canonical string form (`"point"` / `"average"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeseriesType::Point => "point",
            TimeseriesType::Average => "average",
        }
    }

    /// Number of values a series on a grid of `points` time points holds.
    ///
    /// An average series needs one more boundary than it has intervals.
    pub fn value_count(&self, points: usize) -> usize {
        match self {
            TimeseriesType::Point => points,
            TimeseriesType::Average => points.saturating_sub(1),
        }
    }
}

impl fmt::Display for TimeseriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeseriesType {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(TimeseriesType::Point),
            "average" => Ok(TimeseriesType::Average),
            other => Err(TimeError::UnknownTimeseriesType {
                value: other.to_string(),
            }),
        }
    }
}

/// Interpolation policy for in-range target points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationType {
    /// Piecewise-linear interpolation between bracketing source points.
    #[default]
    Linear,
}

/// Policy for target points outside the source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrapolationType {
    /// Fail with [`TimeError::TargetOutsideSource`] if any target point lies
    /// outside the source span.
    #[default]
    None,
    /// Hold the edge value (point series) or edge rate (average series).
    Constant,
    /// Extend the edge slope.
    Linear,
}
