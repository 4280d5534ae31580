//! Time grid construction.

use crate::types::TimeseriesType;

/// Absolute time in seconds since the Unix epoch.
pub type Time = i64;

/// Builds an equally spaced time grid.
///
/// For a point series, produces exactly `count` points starting at `start`.
/// For an average series, produces `count` interval-start points plus one
/// trailing boundary (`count + 1` points in total), since `count` interval
/// averages need `count + 1` boundaries.
///
/// # Example
///
/// ```ignore
/// let points = create_time_points(0, 10, 3, TimeseriesType::Point);
/// assert_eq!(points, vec![0, 10, 20]);
/// let bounds = create_time_points(0, 10, 3, TimeseriesType::Average);
/// assert_eq!(bounds, vec![0, 10, 20, 30]);
/// ```
pub fn create_time_points(
    start: Time,
    step: i64,
    count: usize,
    timeseries_type: TimeseriesType,
) -> Vec<Time> {
    let n = match timeseries_type {
        TimeseriesType::Point => count,
        TimeseriesType::Average => count + 1,
    };
    (0..n).map(|i| start + step * i as i64).collect()
}
