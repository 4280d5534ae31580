//! Resampling of value vectors between time grids.

use crate::error::TimeError;
use crate::points::Time;
use crate::types::{ExtrapolationType, InterpolationType, TimeseriesType};

/// Resamples a 1-D value vector from a source time grid onto a target grid.
///
/// One [`TimeseriesType`] applies to both grids; converting a point series
/// into an average series (or back) in a single call is not supported.
///
/// Point series are piecewise-linearly interpolated. Average series are
/// resampled through their cumulative integral: the stored averages define a
/// piecewise-constant rate, the running integral of that rate is evaluated at
/// the target boundaries, and re-differencing yields the target averages.
/// This conserves value x duration over any span aligned with source
/// interval boundaries.
#[derive(Debug, Clone)]
pub struct TimeseriesConverter {
    source: Vec<Time>,
    target: Vec<Time>,
    timeseries_type: TimeseriesType,
    interpolation: InterpolationType,
    extrapolation: ExtrapolationType,
}

fn validate_grid(points: &[Time]) -> Result<(), TimeError> {
    if points.is_empty() {
        return Err(TimeError::EmptyTimePoints);
    }
    if points.windows(2).any(|w| w[0] >= w[1]) {
        return Err(TimeError::UnsortedTimePoints);
    }
    Ok(())
}

impl TimeseriesConverter {
    /// Creates a converter between two validated time grids.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::EmptyTimePoints`] or
    /// [`TimeError::UnsortedTimePoints`] if either grid is empty or not
    /// strictly increasing.
    pub fn new(
        source: &[Time],
        target: &[Time],
        timeseries_type: TimeseriesType,
        interpolation: InterpolationType,
        extrapolation: ExtrapolationType,
    ) -> Result<Self, TimeError> {
        validate_grid(source)?;
        validate_grid(target)?;
        Ok(Self {
            source: source.to_vec(),
            target: target.to_vec(),
            timeseries_type,
            interpolation,
            extrapolation,
        })
    }

    /// Number of values a vector on the source grid must have.
    pub fn source_length(&self) -> usize {
        value_count(&self.source, self.timeseries_type)
    }

    /// Number of values a converted vector on the target grid will have.
    pub fn target_length(&self) -> usize {
        value_count(&self.target, self.timeseries_type)
    }

    /// Maps source-grid values onto the target grid.
    ///
    /// # Errors
    ///
    /// - [`TimeError::ValuesLengthMismatch`] if `values` does not match the
    ///   source grid;
    /// - [`TimeError::InsufficientData`] if there are fewer than 2 point
    ///   values or fewer than 1 interval average;
    /// - [`TimeError::TargetOutsideSource`] if a target point lies outside
    ///   the source span and extrapolation is
    ///   [`ExtrapolationType::None`].
    pub fn convert_from(&self, values: &[f64]) -> Result<Vec<f64>, TimeError> {
        self.convert(values, &self.source, &self.target)
    }

    /// Maps target-grid values back onto the source grid.
    ///
    /// Same error conditions as [`convert_from`](Self::convert_from), with
    /// the grid roles swapped.
    pub fn convert_to(&self, values: &[f64]) -> Result<Vec<f64>, TimeError> {
        self.convert(values, &self.target, &self.source)
    }

    fn convert(&self, values: &[f64], from: &[Time], to: &[Time]) -> Result<Vec<f64>, TimeError> {
        let expected = value_count(from, self.timeseries_type);
        if values.len() != expected {
            return Err(TimeError::ValuesLengthMismatch {
                values: values.len(),
                expected,
            });
        }
        let min = match self.timeseries_type {
            TimeseriesType::Point => 2,
            TimeseriesType::Average => 1,
        };
        if values.len() < min {
            return Err(TimeError::InsufficientData {
                len: values.len(),
                min,
            });
        }

        // Only linear interpolation is implemented.
        let InterpolationType::Linear = self.interpolation;

        match self.timeseries_type {
            TimeseriesType::Point => self.convert_point(values, from, to),
            TimeseriesType::Average => self.convert_average(values, from, to),
        }
    }

    fn convert_point(
        &self,
        values: &[f64],
        from: &[Time],
        to: &[Time],
    ) -> Result<Vec<f64>, TimeError> {
        to.iter()
            .map(|&t| self.sample_point(values, from, t))
            .collect()
    }

    /// Evaluates the piecewise-linear curve through `(from, values)` at `t`.
    fn sample_point(&self, values: &[f64], from: &[Time], t: Time) -> Result<f64, TimeError> {
        let first = from[0];
        let last = from[from.len() - 1];
        if t < first {
            return match self.extrapolation {
                ExtrapolationType::None => Err(TimeError::TargetOutsideSource),
                ExtrapolationType::Constant => Ok(values[0]),
                ExtrapolationType::Linear => {
                    Ok(values[0] + segment_slope(from, values, 0) * (t - first) as f64)
                }
            };
        }
        if t > last {
            return match self.extrapolation {
                ExtrapolationType::None => Err(TimeError::TargetOutsideSource),
                ExtrapolationType::Constant => Ok(values[values.len() - 1]),
                ExtrapolationType::Linear => Ok(values[values.len() - 1]
                    + segment_slope(from, values, from.len() - 2) * (t - last) as f64),
            };
        }
        // partition_point returns the first index with from[i] > t, so the
        // bracketing segment starts at i - 1.
        let i = from.partition_point(|&s| s <= t).saturating_sub(1).min(from.len() - 2);
        Ok(values[i] + segment_slope(from, values, i) * (t - from[i]) as f64)
    }

    fn convert_average(
        &self,
        values: &[f64],
        from: &[Time],
        to: &[Time],
    ) -> Result<Vec<f64>, TimeError> {
        if self.extrapolation == ExtrapolationType::None
            && (to[0] < from[0] || to[to.len() - 1] > from[from.len() - 1])
        {
            return Err(TimeError::TargetOutsideSource);
        }

        // Running integral of the piecewise-constant rate at source boundaries.
        let mut cumulative = Vec::with_capacity(from.len());
        cumulative.push(0.0);
        for (i, &v) in values.iter().enumerate() {
            let dt = (from[i + 1] - from[i]) as f64;
            cumulative.push(cumulative[i] + v * dt);
        }

        let mut out = Vec::with_capacity(to.len() - 1);
        let mut prev = self.integral_to(&cumulative, values, from, to[0]);
        for j in 1..to.len() {
            let next = self.integral_to(&cumulative, values, from, to[j]);
            let dt = (to[j] - to[j - 1]) as f64;
            out.push((next - prev) / dt);
            prev = next;
        }
        Ok(out)
    }

    /// Evaluates the running integral of the rate curve at `t`.
    ///
    /// Out-of-range behaviour follows the extrapolation policy on the rate:
    /// `Constant` holds the edge interval's average, `Linear` extends the
    /// rate through the last two interval midpoints. `None` never reaches
    /// here for out-of-range points.
    fn integral_to(&self, cumulative: &[f64], values: &[f64], from: &[Time], t: Time) -> f64 {
        let first = from[0];
        let last = from[from.len() - 1];
        if t < first {
            let span = (first - t) as f64;
            return match self.extrapolation {
                ExtrapolationType::None | ExtrapolationType::Constant => -values[0] * span,
                ExtrapolationType::Linear => {
                    let (rate_at, slope) = edge_rate(values, from, Edge::Start);
                    // Integral of rate(u) = rate_at + slope * (u - first) from t to first.
                    -(rate_at * span - slope * span * span / 2.0)
                }
            };
        }
        if t > last {
            let total = cumulative[cumulative.len() - 1];
            let span = (t - last) as f64;
            return match self.extrapolation {
                ExtrapolationType::None | ExtrapolationType::Constant => {
                    total + values[values.len() - 1] * span
                }
                ExtrapolationType::Linear => {
                    let (rate_at, slope) = edge_rate(values, from, Edge::End);
                    total + rate_at * span + slope * span * span / 2.0
                }
            };
        }
        let i = from.partition_point(|&s| s <= t).saturating_sub(1).min(values.len() - 1);
        cumulative[i] + values[i] * (t - from[i]) as f64
    }
}

/// Which end of the source span an extrapolation extends.
enum Edge {
    Start,
    End,
}

/// Slope of the point-series segment starting at index `i`.
fn segment_slope(from: &[Time], values: &[f64], i: usize) -> f64 {
    (values[i + 1] - values[i]) / (from[i + 1] - from[i]) as f64
}

/// Rate at the edge boundary and its slope, estimated from the last two
/// interval averages placed at their midpoints. With a single interval the
/// slope is zero, which degrades to constant extrapolation.
fn edge_rate(values: &[f64], from: &[Time], edge: Edge) -> (f64, f64) {
    let n = values.len();
    if n < 2 {
        return (values[0], 0.0);
    }
    let midpoint = |i: usize| (from[i] as f64 + from[i + 1] as f64) / 2.0;
    let (i_edge, i_prev, boundary) = match edge {
        Edge::Start => (0, 1, from[0] as f64),
        Edge::End => (n - 1, n - 2, from[n] as f64),
    };
    let slope = (values[i_edge] - values[i_prev]) / (midpoint(i_edge) - midpoint(i_prev));
    (values[i_edge] + slope * (boundary - midpoint(i_edge)), slope)
}

fn value_count(points: &[Time], timeseries_type: TimeseriesType) -> usize {
    match timeseries_type {
        TimeseriesType::Point => points.len(),
        TimeseriesType::Average => points.len() - 1,
    }
}
