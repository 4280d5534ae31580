//! # helios-time
//!
//! Time grids and resolution conversion for model timeseries.
//!
//! Parameter timeseries live on grids of absolute time points (seconds since
//! the Unix epoch). Two conventions exist:
//!
//! - **point**: each grid point carries an instantaneous sample;
//! - **average**: each value is the mean over the interval starting at its
//!   grid point, so a series of `n` values needs `n + 1` boundary points.
//!
//! [`TimeseriesConverter`] resamples a value vector from one grid onto
//! another. Point series are piecewise-linearly interpolated; average series
//! are converted through their cumulative integral, which conserves
//! value x duration over any span aligned with source interval boundaries.
//! Behaviour outside the source span is governed by [`ExtrapolationType`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_time::{create_time_points, TimeseriesConverter, TimeseriesType,
//!                   InterpolationType, ExtrapolationType};
//!
//! let daily = create_time_points(0, 86_400, 730, TimeseriesType::Average);
//! let yearly = create_time_points(0, 365 * 86_400, 2, TimeseriesType::Average);
//! let converter = TimeseriesConverter::new(
//!     &daily,
//!     &yearly,
//!     TimeseriesType::Average,
//!     InterpolationType::Linear,
//!     ExtrapolationType::None,
//! )?;
//! let yearly_means = converter.convert_from(&daily_values)?;
//! ```
//!
//! Converting between the two conventions in a single call is not supported;
//! one [`TimeseriesType`] applies to both grids.

mod convert;
mod error;
mod points;
mod types;

pub use convert::TimeseriesConverter;
pub use error::TimeError;
pub use points::{create_time_points, Time};
pub use types::{ExtrapolationType, InterpolationType, TimeseriesType};
