//! # helios-units
//!
//! Unit parsing and scalar conversion for climate-model parameters.
//!
//! Conversion factors are computed from unit strings such as `"GtC/yr"`,
//! `"ktC/d"`, `"degC"` or `"W/m^2"`. The built-in [`SiRegistry`] parses SI
//! prefixes, powers (`m^2`), products and quotients, and supports the affine
//! temperature scales (`K`, `degC`, `degF`) as well as carbon-mass
//! conversions (`C` vs `CO2` via the molar-mass ratio 44/12).
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_units::UnitConverter;
//!
//! let conv = UnitConverter::new("kg", "g")?;
//! assert_eq!(conv.convert_from(2.0), 2000.0);
//! assert_eq!(conv.convert_to(2000.0), 2.0);
//!
//! // Affine units work too.
//! let temp = UnitConverter::new("degF", "degC")?;
//! assert!((temp.convert_from(68.0) - 20.0).abs() < 1e-12);
//! ```
//!
//! The registry is an injected capability: anything implementing
//! [`UnitRegistry`] can back a [`UnitConverter`], so a model adapter with its
//! own unit tables can plug in without touching this crate.

mod converter;
mod error;
mod parse;
mod registry;

pub use converter::UnitConverter;
pub use error::UnitError;
pub use registry::{Conversion, SiRegistry, UnitRegistry};
