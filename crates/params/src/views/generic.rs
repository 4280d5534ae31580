//! Generic parameter views.
//!
//! Generic parameters hold opaque values with no unit or time semantics and
//! cannot be aggregated; views on them always address a single node.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ParameterError;
use crate::store::{ParameterData, ParameterId, Store};
use crate::types::{GenericValue, ParameterInfo};

/// Read view on a generic parameter.
#[derive(Debug, Clone)]
pub struct GenericView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
}

impl GenericView {
    pub(crate) fn new(store: Rc<RefCell<Store>>, id: ParameterId) -> Self {
        GenericView { store, id }
    }

    /// The current value.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Empty`] if the parameter has never been
    /// written.
    pub fn get(&self) -> Result<GenericValue, ParameterError> {
        let store = self.store.borrow();
        match &store.parameter(self.id).data {
            ParameterData::Generic(value) => Ok(value.clone()),
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

    /// Metadata of the underlying parameter.
    pub fn info(&self) -> ParameterInfo {
        self.store.borrow().parameter_info(self.id)
    }
}

/// Writable view on a generic parameter.
#[derive(Debug)]
pub struct WritableGenericView {
    store: Rc<RefCell<Store>>,
    id: ParameterId,
}

impl WritableGenericView {
    pub(crate) fn new(store: Rc<RefCell<Store>>, id: ParameterId) -> Self {
        WritableGenericView { store, id }
    }

    /// Stores a value.
    pub fn set(&mut self, value: impl Into<GenericValue>) -> Result<(), ParameterError> {
        self.store
            .borrow_mut()
            .write_data(self.id, ParameterData::Generic(value.into()), None);
        Ok(())
    }

    /// Reads back the stored value.
    pub fn get(&self) -> Result<GenericValue, ParameterError> {
        let store = self.store.borrow();
        match &store.parameter(self.id).data {
            ParameterData::Generic(value) => Ok(value.clone()),
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
}
