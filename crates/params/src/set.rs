//! The `ParameterSet` facade.

use std::cell::RefCell;
use std::rc::Rc;

use helios_time::{ExtrapolationType, InterpolationType, Time, TimeseriesType};
use helios_units::UnitConverter;

use crate::error::ParameterError;
use crate::path::Path;
use crate::store::Store;
use crate::types::{ParameterInfo, ParameterType, RegionInfo};
use crate::views::{
    GenericView, ScalarView, TimeseriesView, WritableGenericView, WritableScalarView,
    WritableTimeseriesView,
};

/// Grid and conversion policy for a timeseries view.
///
/// Defaults to a point series with linear interpolation and no
/// extrapolation; override with the `with_*` builder methods.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesSpec {
    time_points: Vec<Time>,
    timeseries_type: TimeseriesType,
    interpolation: InterpolationType,
    extrapolation: ExtrapolationType,
}

impl TimeseriesSpec {
    /// A point-series spec over the given time grid.
    pub fn new(time_points: Vec<Time>) -> Self {
        TimeseriesSpec {
            time_points,
            timeseries_type: TimeseriesType::Point,
            interpolation: InterpolationType::default(),
            extrapolation: ExtrapolationType::default(),
        }
    }

    pub fn with_timeseries_type(mut self, timeseries_type: TimeseriesType) -> Self {
        self.timeseries_type = timeseries_type;
        self
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationType) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_extrapolation(mut self, extrapolation: ExtrapolationType) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn time_points(&self) -> &[Time] {
        &self.time_points
    }

    pub fn timeseries_type(&self) -> TimeseriesType {
        self.timeseries_type
    }

    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    pub fn extrapolation(&self) -> ExtrapolationType {
        self.extrapolation
    }

    /// Number of values a series on this spec's grid holds.
    pub fn length(&self) -> usize {
        self.timeseries_type.value_count(self.time_points.len())
    }
}

/// A hierarchical, region-scoped parameter store.
///
/// `ParameterSet` is a cheap cloneable handle onto shared state; clones see
/// each other's writes. It is deliberately not `Send` or `Sync`.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    store: Rc<RefCell<Store>>,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSet {
    /// A new parameter set with the default root region `"World"`.
    pub fn new() -> Self {
        Self::with_root("World")
    }

    /// A new parameter set with a custom root region name.
    pub fn with_root(root: &str) -> Self {
        ParameterSet {
            store: Rc::new(RefCell::new(Store::new(root))),
        }
    }

    /// Name of the root region.
    pub fn root_region(&self) -> String {
        self.store.borrow().root_name().to_string()
    }

    /// Read view on a scalar parameter in the root region.
    pub fn scalar(
        &self,
        name: impl Into<Path>,
        unit: &str,
    ) -> Result<ScalarView, ParameterError> {
        let region = self.root_path();
        self.scalar_in(region, name, unit)
    }

    /// Read view on a scalar parameter in the given region.
    pub fn scalar_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
        unit: &str,
    ) -> Result<ScalarView, ParameterError> {
        let id = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_read(id, ParameterType::Scalar, Some(unit), None)?;
            Self::check_dimensionality(&store, id, unit)?;
            id
        };
        Ok(ScalarView::new(Rc::clone(&self.store), id, unit))
    }

    /// Writable view on a scalar parameter in the root region.
    pub fn writable_scalar(
        &self,
        name: impl Into<Path>,
        unit: &str,
    ) -> Result<WritableScalarView, ParameterError> {
        let region = self.root_path();
        self.writable_scalar_in(region, name, unit)
    }

    /// Writable view on a scalar parameter in the given region.
    ///
    /// Fails at creation if the parameter has children, if its established
    /// type is not scalar or if the unit is incommensurable with the
    /// established one.
    pub fn writable_scalar_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
        unit: &str,
    ) -> Result<WritableScalarView, ParameterError> {
        let (id, converter) = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_write(id, ParameterType::Scalar, Some(unit))?;
            (id, Self::check_dimensionality(&store, id, unit)?)
        };
        Ok(WritableScalarView::new(
            Rc::clone(&self.store),
            id,
            unit,
            converter,
        ))
    }

    /// Read view on a timeseries parameter in the root region.
    pub fn timeseries(
        &self,
        name: impl Into<Path>,
        unit: &str,
        spec: &TimeseriesSpec,
    ) -> Result<TimeseriesView, ParameterError> {
        let region = self.root_path();
        self.timeseries_in(region, name, unit, spec)
    }

    /// Read view on a timeseries parameter in the given region.
    ///
    /// The view resamples stored data onto `spec`'s grid and converts it
    /// into `unit` on every read, caching the result until the parameter is
    /// written again.
    pub fn timeseries_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
        unit: &str,
        spec: &TimeseriesSpec,
    ) -> Result<TimeseriesView, ParameterError> {
        let id = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_read(
                id,
                ParameterType::from_timeseries_type(spec.timeseries_type()),
                Some(unit),
                Some(spec.time_points()),
            )?;
            Self::check_dimensionality(&store, id, unit)?;
            id
        };
        Ok(TimeseriesView::new(
            Rc::clone(&self.store),
            id,
            unit,
            spec.clone(),
        ))
    }

    /// Writable view on a timeseries parameter in the root region.
    pub fn writable_timeseries(
        &self,
        name: impl Into<Path>,
        unit: &str,
        spec: &TimeseriesSpec,
    ) -> Result<WritableTimeseriesView, ParameterError> {
        let region = self.root_path();
        self.writable_timeseries_in(region, name, unit, spec)
    }

    /// Writable view on a timeseries parameter in the given region.
    ///
    /// Writes store data at `spec`'s grid, converted into the parameter's
    /// established unit; the grid of earlier writers is overwritten.
    pub fn writable_timeseries_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
        unit: &str,
        spec: &TimeseriesSpec,
    ) -> Result<WritableTimeseriesView, ParameterError> {
        let (id, converter) = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_write(
                id,
                ParameterType::from_timeseries_type(spec.timeseries_type()),
                Some(unit),
            )?;
            (id, Self::check_dimensionality(&store, id, unit)?)
        };
        Ok(WritableTimeseriesView::new(
            Rc::clone(&self.store),
            id,
            unit,
            spec.clone(),
            converter,
        ))
    }

    /// Read view on a generic parameter in the root region.
    pub fn generic(&self, name: impl Into<Path>) -> Result<GenericView, ParameterError> {
        let region = self.root_path();
        self.generic_in(region, name)
    }

    /// Read view on a generic parameter in the given region.
    pub fn generic_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
    ) -> Result<GenericView, ParameterError> {
        let id = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_read(id, ParameterType::Generic, None, None)?;
            id
        };
        Ok(GenericView::new(Rc::clone(&self.store), id))
    }

    /// Writable view on a generic parameter in the root region.
    pub fn writable_generic(
        &self,
        name: impl Into<Path>,
    ) -> Result<WritableGenericView, ParameterError> {
        let region = self.root_path();
        self.writable_generic_in(region, name)
    }

    /// Writable view on a generic parameter in the given region.
    pub fn writable_generic_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
    ) -> Result<WritableGenericView, ParameterError> {
        let id = {
            let mut store = self.store.borrow_mut();
            let region = store.get_or_create_region(&region.into())?;
            let id = store.get_or_create_parameter(region, &name.into())?;
            store.attempt_write(id, ParameterType::Generic, None)?;
            id
        };
        Ok(WritableGenericView::new(Rc::clone(&self.store), id))
    }

    /// Metadata for an existing parameter in the root region, if any.
    pub fn info(&self, name: impl Into<Path>) -> Option<ParameterInfo> {
        let region = self.root_path();
        self.info_in(region, name)
    }

    /// Metadata for an existing parameter in the given region, if any.
    ///
    /// Returns `None` for an unknown region or parameter, without creating
    /// either.
    pub fn info_in(
        &self,
        region: impl Into<Path>,
        name: impl Into<Path>,
    ) -> Option<ParameterInfo> {
        let store = self.store.borrow();
        let region = store.get_region(&region.into())?;
        let id = store.get_parameter(region, &name.into())?;
        Some(store.parameter_info(id))
    }

    /// Metadata for an existing region, if any.
    pub fn region_info(&self, region: impl Into<Path>) -> Option<RegionInfo> {
        let store = self.store.borrow();
        let id = store.get_region(&region.into())?;
        Some(store.region_info(id))
    }

    /// Marks a region as aggregated, forbidding new subregions under it.
    ///
    /// Aggregate reads mark their region implicitly; this is the explicit
    /// form for callers that sum across regions themselves.
    pub fn aggregate_region(&self, region: impl Into<Path>) -> Result<(), ParameterError> {
        let mut store = self.store.borrow_mut();
        let id = store.get_or_create_region(&region.into())?;
        store.attempt_region_aggregate(id);
        Ok(())
    }

    fn root_path(&self) -> Path {
        Path::from(self.store.borrow().root_name())
    }

    /// Checks the view unit against the parameter's established unit. The
    /// returned converter maps the established unit to the view unit.
    fn check_dimensionality(
        store: &Store,
        id: crate::store::ParameterId,
        unit: &str,
    ) -> Result<UnitConverter, ParameterError> {
        let internal = match store.parameter(id).unit.as_deref() {
            Some(internal) => internal.to_string(),
            None => unit.to_string(),
        };
        Ok(UnitConverter::new(&internal, unit)?)
    }
}
