//! Error types for the helios-params crate.

use helios_time::TimeError;
use helios_units::UnitError;

use crate::types::ParameterType;

/// Error type for all fallible operations in the helios-params crate.
///
/// All variants are programmer/caller-input errors raised synchronously at
/// the point of violation; the store performs no recovery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Returned when reading a parameter that has never been written to.
    #[error("parameter {parameter} is required but empty")]
    Empty {
        /// Full name of the parameter.
        parameter: String,
    },

    /// Returned when the requested type conflicts with the type established
    /// by the first access.
    #[error("parameter {parameter} is of type {actual}, requested {requested}")]
    Type {
        /// Full name of the parameter.
        parameter: String,
        /// The established type.
        actual: ParameterType,
        /// The conflicting requested type.
        requested: ParameterType,
    },

    /// Returned when writing directly to a parameter that has children.
    #[error("parameter {parameter} has child parameters and cannot be written directly")]
    Readonly {
        /// Full name of the aggregate parameter.
        parameter: String,
    },

    /// Returned when creating a child under a parameter that has already
    /// been read in aggregate.
    #[error("cannot create {parameter}: an enclosing parameter has already been read in aggregate")]
    Read {
        /// Full name of the parameter that could not be created.
        parameter: String,
    },

    /// Returned when creating a child under a parameter that has already
    /// been written as a leaf.
    #[error("cannot create {parameter}: an enclosing parameter has already been written as a leaf")]
    Written {
        /// Full name of the parameter that could not be created.
        parameter: String,
    },

    /// Returned when adding a subregion to a region that has already been
    /// aggregated over.
    #[error("cannot create region {region}: its parent has already been aggregated")]
    RegionAggregated {
        /// Full name of the region that could not be created.
        region: String,
    },

    /// Returned when a read would require aggregating generic values.
    #[error("parameter {parameter} is generic and cannot be aggregated")]
    Aggregation {
        /// Full name of the generic parameter with children.
        parameter: String,
    },

    /// Returned when a written value vector does not match the view's grid.
    #[error("values length {values} does not match view length {expected}")]
    PointsValuesMismatch {
        /// Length of the provided value vector.
        values: usize,
        /// Length implied by the view's time grid.
        expected: usize,
    },

    /// Returned when a region accessor path is empty.
    #[error("no region name given")]
    NoRegionName,

    /// Returned when a parameter accessor path is empty.
    #[error("no parameter name given")]
    NoParameterName,

    /// Returned when an absolute region path does not start at the root.
    #[error("cannot access region {requested}, root region for this parameter set is {root}")]
    RootRegionMismatch {
        /// First segment of the requested path.
        requested: String,
        /// The root region name of this parameter set.
        root: String,
    },

    /// Unit lookup or conversion failure (including dimensionality errors).
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Time grid or resampling failure (including insufficient data).
    #[error(transparent)]
    Time(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty() {
        let e = ParameterError::Empty {
            parameter: "Emissions|CO2".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "parameter Emissions|CO2 is required but empty"
        );
    }

    #[test]
    fn error_type() {
        let e = ParameterError::Type {
            parameter: "Emissions|CO2".to_string(),
            actual: ParameterType::AverageTimeseries,
            requested: ParameterType::Scalar,
        };
        assert_eq!(
            e.to_string(),
            "parameter Emissions|CO2 is of type average timeseries, requested scalar"
        );
    }

    #[test]
    fn error_root_region_mismatch() {
        let e = ParameterError::RootRegionMismatch {
            requested: "Earth".to_string(),
            root: "World".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "cannot access region Earth, root region for this parameter set is World"
        );
    }

    #[test]
    fn unit_error_wraps_transparently() {
        let e: ParameterError = UnitError::Dimensionality {
            source_unit: "degC".to_string(),
            target_unit: "kg".to_string(),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "cannot convert from degC to kg: incompatible dimensions"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ParameterError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ParameterError>();
    }
}
