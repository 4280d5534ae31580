//! # helios-params
//!
//! Hierarchical, region-scoped parameter store for coupling climate model
//! adapters.
//!
//! A [`ParameterSet`] owns a tree of named regions (e.g.
//! `World|DEU|BER`), each anchoring a tree of named parameters (e.g.
//! `Emissions|CO2|Fossil`). Raw data lives only at leaf parameters; a parent
//! parameter's value is the sum of its leaf descendants, converted into the
//! reader's unit (and time grid, for timeseries).
//!
//! All access goes through short-lived typed **views** created by the
//! facade: [`ScalarView`], [`TimeseriesView`], [`GenericView`] and their
//! writable counterparts. Views convert units and resample time grids
//! transparently, and cache converted reads keyed on the parameter's write
//! version.
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_params::ParameterSet;
//!
//! let set = ParameterSet::new();
//! set.writable_scalar(["Top", "a", "1"], "dimensionless")?.set(0.6)?;
//! set.writable_scalar(["Top", "a", "2"], "dimensionless")?.set(0.3)?;
//!
//! // Reading the parent aggregates over the leaves.
//! let total = set.scalar(["Top", "a"], "dimensionless")?.get()?;
//! assert!((total - 0.9).abs() < 1e-12);
//! ```
//!
//! ## Structural locking
//!
//! Reading a parent in aggregate freezes its subtree: creating new children
//! afterwards fails with [`ParameterError::Read`], so an aggregate can never
//! silently go stale. Writing a leaf likewise forbids growing children under
//! it ([`ParameterError::Written`]), and parameters with children reject
//! direct writes ([`ParameterError::Readonly`]). The same idea applies to
//! regions via [`ParameterError::RegionAggregated`].
//!
//! The store is single-threaded by design: a `ParameterSet` is a cheap
//! cloneable handle (`Rc`-backed) and is deliberately not `Send`/`Sync`.

mod error;
mod path;
mod set;
mod store;
mod types;
mod views;

pub use error::ParameterError;
pub use path::{Path, PATH_SEPARATOR};
pub use set::{ParameterSet, TimeseriesSpec};
pub use types::{GenericValue, ParameterInfo, ParameterType, RegionInfo};
pub use views::{
    GenericView, ScalarView, TimeseriesView, WritableGenericView, WritableScalarView,
    WritableTimeseriesView,
};
