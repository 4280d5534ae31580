//! Timeseries parameter views.

use std::cell::RefCell;
use std::rc::Rc;

use helios_time::Time;
use helios_units::UnitConverter;

use crate::error::ParameterError;
use crate::set::TimeseriesSpec;
use crate::store::{ParameterData, ParameterId, Store};
use crate::types::ParameterInfo;
use crate::views::{any_leaf_empty, read_timeseries};

/// Read view on a timeseries parameter.
///
/// Every read resamples the stored data onto the view's grid and converts
/// it into the view's unit. Results are cached against the parameter's
/// version, so repeated reads between writes are free.
#[derive(Debug)]
pub struct TimeseriesView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
    unit: String,
    spec: TimeseriesSpec,
    cache: RefCell<Option<(u64, Vec<f64>)>>,
}

impl TimeseriesView {
    pub(crate) fn new(
        store: Rc<RefCell<Store>>,
        id: ParameterId,
        unit: &str,
        spec: TimeseriesSpec,
    ) -> Self {
        TimeseriesView {
            store,
            id,
            unit: unit.to_string(),
            spec,
            cache: RefCell::new(None),
        }
    }

    /// The current values on the view's grid, in the view's unit.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Empty`] if the parameter (or any leaf under
    /// it) has never been written, or a conversion error if a leaf cannot be
    /// brought onto the view's grid and unit.
    pub fn get(&self) -> Result<Vec<f64>, ParameterError> {
        let mut store = self.store.borrow_mut();
        let version = store.version(self.id);
        if let Some((cached_version, values)) = self.cache.borrow().as_ref() {
            if *cached_version == version {
                return Ok(values.clone());
            }
        }
        let values = read_timeseries(&mut store, self.id, &self.unit, &self.spec)?;
        self.cache.replace(Some((version, values.clone())));
        Ok(values)
    }

    /// Whether the parameter (or any leaf under it) is still unwritten.
    pub fn is_empty(&self) -> bool {
        any_leaf_empty(&self.store.borrow(), self.id)
    }

    /// Number of values on the view's grid.
    pub fn length(&self) -> usize {
        self.spec.length()
    }

    /// The view's time grid.
    pub fn time_points(&self) -> &[Time] {
        self.spec.time_points()
    }

    /// Write count of the parameter and its subtree.
    pub fn version(&self) -> u64 {
        self.store.borrow().version(self.id)
    }

    /// The view's unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Metadata of the underlying parameter.
    pub fn info(&self) -> ParameterInfo {
        self.store.borrow().parameter_info(self.id)
    }
}

/// Writable view on a timeseries leaf parameter.
///
/// Writes store data at the view's grid, converted into the parameter's
/// established unit; the grid of any earlier writer is overwritten.
#[derive(Debug)]
pub struct WritableTimeseriesView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
    unit: String,
    spec: TimeseriesSpec,
    // Established unit -> view unit; inverted on write.
    converter: UnitConverter,
}

impl WritableTimeseriesView {
    pub(crate) fn new(
        store: Rc<RefCell<Store>>,
        id: ParameterId,
        unit: &str,
        spec: TimeseriesSpec,
        converter: UnitConverter,
    ) -> Self {
        WritableTimeseriesView {
            store,
            id,
            unit: unit.to_string(),
            spec,
            converter,
        }
    }

    /// Stores a value vector sampled on the view's grid.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::PointsValuesMismatch`] if `values` does not
    /// match the view's grid.
    pub fn set(&mut self, values: &[f64]) -> Result<(), ParameterError> {
        let expected = self.spec.length();
        if values.len() != expected {
            return Err(ParameterError::PointsValuesMismatch {
                values: values.len(),
                expected,
            });
        }
        let internal = self.converter.convert_to_slice(values);
        self.store.borrow_mut().write_data(
            self.id,
            ParameterData::Timeseries(internal),
            Some(self.spec.time_points().to_vec()),
        );
        Ok(())
    }

    /// Reads back the stored values, resampled onto the view's grid.
    pub fn get(&self) -> Result<Vec<f64>, ParameterError> {
        let mut store = self.store.borrow_mut();
        read_timeseries(&mut store, self.id, &self.unit, &self.spec)
    }

    /// Whether the parameter is still unwritten.
    pub fn is_empty(&self) -> bool {
        self.store.borrow().parameter(self.id).data == ParameterData::Empty
    }

    /// Number of values on the view's grid.
    pub fn length(&self) -> usize {
        self.spec.length()
    }

    /// The view's time grid.
    pub fn time_points(&self) -> &[Time] {
        self.spec.time_points()
    }

    /// Write count of the parameter.
    pub fn version(&self) -> u64 {
        self.store.borrow().version(self.id)
    }

    /// The view's unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }
}
