//! Typed views onto parameters.
//!
//! Views are the only way in or out of a [`crate::ParameterSet`]. Read views
//! convert and aggregate on every access; writable views convert into the
//! parameter's established unit on every write. All conversion state is
//! fixed at view creation, so a view stays valid for the lifetime of its
//! parameter set.

mod generic;
mod scalar;
mod timeseries;

pub use generic::{GenericView, WritableGenericView};
pub use scalar::{ScalarView, WritableScalarView};
pub use timeseries::{TimeseriesView, WritableTimeseriesView};

use helios_time::TimeseriesConverter;
use helios_units::UnitConverter;

use crate::error::ParameterError;
use crate::set::TimeseriesSpec;
use crate::store::{ParameterData, ParameterId, Store};
use crate::types::ParameterType;

/// Reads a scalar, summing over leaf descendants with per-leaf unit
/// conversion. Reading an aggregate marks the owning region aggregated.
pub(crate) fn read_scalar(
    store: &mut Store,
    id: ParameterId,
    unit: &str,
) -> Result<f64, ParameterError> {
    mark_region_on_aggregate(store, id);
    let mut sum = 0.0;
    for leaf in store.leaves(id) {
        let node = store.parameter(leaf);
        let value = match &node.data {
            ParameterData::Scalar(value) => *value,
            ParameterData::Empty => {
                return Err(ParameterError::Empty {
                    parameter: store.parameter_name_string(leaf),
                })
            }
            _ => return Err(leaf_type_error(store, leaf, ParameterType::Scalar)),
        };
        let internal = node.unit.clone().unwrap_or_else(|| unit.to_string());
        let converter = UnitConverter::new(&internal, unit)?;
        sum += converter.convert_from(value);
    }
    Ok(sum)
}

/// Reads a timeseries, resampling each leaf onto the view grid and summing,
/// with per-leaf unit conversion. Reading an aggregate marks the owning
/// region aggregated.
pub(crate) fn read_timeseries(
    store: &mut Store,
    id: ParameterId,
    unit: &str,
    spec: &TimeseriesSpec,
) -> Result<Vec<f64>, ParameterError> {
    mark_region_on_aggregate(store, id);
    let requested = ParameterType::from_timeseries_type(spec.timeseries_type());
    let mut sum = vec![0.0; spec.length()];
    for leaf in store.leaves(id) {
        let node = store.parameter(leaf);
        let (values, grid) = match (&node.data, &node.time_points) {
            (ParameterData::Timeseries(values), Some(grid)) => (values.clone(), grid.clone()),
            (ParameterData::Empty, _) => {
                return Err(ParameterError::Empty {
                    parameter: store.parameter_name_string(leaf),
                })
            }
            _ => return Err(leaf_type_error(store, leaf, requested)),
        };
        let internal = node.unit.clone().unwrap_or_else(|| unit.to_string());
        let unit_converter = UnitConverter::new(&internal, unit)?;
        let time_converter = TimeseriesConverter::new(
            &grid,
            spec.time_points(),
            spec.timeseries_type(),
            spec.interpolation(),
            spec.extrapolation(),
        )?;
        let resampled = time_converter.convert_from(&unit_converter.convert_from_slice(&values))?;
        for (acc, value) in sum.iter_mut().zip(resampled) {
            *acc += value;
        }
    }
    Ok(sum)
}

/// Whether any leaf under the node is still unwritten.
pub(crate) fn any_leaf_empty(store: &Store, id: ParameterId) -> bool {
    store
        .leaves(id)
        .into_iter()
        .any(|leaf| store.parameter(leaf).data == ParameterData::Empty)
}

fn mark_region_on_aggregate(store: &mut Store, id: ParameterId) {
    if !store.parameter(id).children.is_empty() {
        let region = store.parameter(id).region;
        store.attempt_region_aggregate(region);
    }
}

fn leaf_type_error(store: &Store, leaf: ParameterId, requested: ParameterType) -> ParameterError {
    ParameterError::Type {
        parameter: store.parameter_name_string(leaf),
        actual: store
            .parameter(leaf)
            .parameter_type
            .unwrap_or(ParameterType::Generic),
        requested,
    }
}
