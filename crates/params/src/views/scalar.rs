//! Scalar parameter views.

use std::cell::RefCell;
use std::rc::Rc;

use helios_units::UnitConverter;

use crate::error::ParameterError;
use crate::store::{ParameterData, ParameterId, Store};
use crate::types::ParameterInfo;
use crate::views::{any_leaf_empty, read_scalar};

/// Read view on a scalar parameter.
///
/// If the parameter has children, [`get`](Self::get) returns the
/// unit-converted sum over all leaf descendants.
#[derive(Debug, Clone)]
pub struct ScalarView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
    unit: String,
}

impl ScalarView {
    pub(crate) fn new(store: Rc<RefCell<Store>>, id: ParameterId, unit: &str) -> Self {
        ScalarView {
            store,
            id,
            unit: unit.to_string(),
        }
    }

    /// The current value, converted into the view's unit.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Empty`] if the parameter (or any leaf under
    /// it) has never been written.
    pub fn get(&self) -> Result<f64, ParameterError> {
        let mut store = self.store.borrow_mut();
        read_scalar(&mut store, self.id, &self.unit)
    }

    /// Whether the parameter (or any leaf under it) is still unwritten.
    pub fn is_empty(&self) -> bool {
        any_leaf_empty(&self.store.borrow(), self.id)
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

/// Writable view on a scalar leaf parameter.
#[derive(Debug)]
pub struct WritableScalarView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
    unit: String,
    // Established unit -> view unit; inverted on write.
    converter: UnitConverter,
}

impl WritableScalarView {
    pub(crate) fn new(
        store: Rc<RefCell<Store>>,
        id: ParameterId,
        unit: &str,
        converter: UnitConverter,
    ) -> Self {
        WritableScalarView {
            store,
            id,
            unit: unit.to_string(),
            converter,
        }
    }

    /// Stores a value, converting it into the parameter's established unit.
    pub fn set(&mut self, value: f64) -> Result<(), ParameterError> {
        let internal = self.converter.convert_to(value);
        self.store
            .borrow_mut()
            .write_data(self.id, ParameterData::Scalar(internal), None);
        Ok(())
    }

    /// Reads back the stored value in the view's unit.
    pub fn get(&self) -> Result<f64, ParameterError> {
        let store = self.store.borrow();
        match &store.parameter(self.id).data {
            ParameterData::Scalar(value) => Ok(self.converter.convert_from(*value)),
            _ => Err(ParameterError::Empty {
                parameter: store.parameter_name_string(self.id),
            }),
        }
    }

    /// Whether the parameter is still unwritten.
    pub fn is_empty(&self) -> bool {
        self.store.borrow().parameter(self.id).data == ParameterData::Empty
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
