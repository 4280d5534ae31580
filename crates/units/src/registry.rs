//! The unit-registry capability and its built-in SI implementation.

use crate::error::UnitError;
use crate::parse::{commensurable, parse_unit};

/// An affine conversion between two unit strings.
///
/// A value `v` in source units maps to `v * factor + offset` in target units.
/// Purely multiplicative pairs have `offset == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Multiplicative factor applied to source values.
    pub factor: f64,
    /// Additive offset in target units (non-zero for temperature scales).
    pub offset: f64,
}

impl Conversion {
    /// The identity conversion.
    pub fn identity() -> Self {
        Self {
            factor: 1.0,
            offset: 0.0,
        }
    }

    /// Applies the conversion to a source-unit value.
    pub fn apply(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Applies the inverse conversion to a target-unit value.
    pub fn invert(&self, value: f64) -> f64 {
        (value - self.offset) / self.factor
    }
}

/// Capability for looking up conversions between unit strings.
///
/// [`UnitConverter`](crate::UnitConverter) consumes this trait, so a model
/// adapter shipping its own unit tables can supply an alternative registry.
pub trait UnitRegistry {
    /// Computes the conversion from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Dimensionality`] if the units are not
    /// commensurable, or a parse error if either string is invalid.
    fn conversion(&self, from: &str, to: &str) -> Result<Conversion, UnitError>;
}

/// The built-in registry backed by the SI parser in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiRegistry;

impl SiRegistry {
    /// Creates the built-in registry.
    pub fn new() -> Self {
        Self
    }
}

impl UnitRegistry for SiRegistry {
    fn conversion(&self, from: &str, to: &str) -> Result<Conversion, UnitError> {
        let source = parse_unit(from)?;
        let target = parse_unit(to)?;
        if !commensurable(&source, &target) {
            return Err(UnitError::Dimensionality {
                source_unit: from.to_string(),
                target_unit: to.to_string(),
            });
        }
        // Through canonical units: canonical = v * s.scale + s.offset,
        // target = (canonical - t.offset) / t.scale.
        Ok(Conversion {
            factor: source.scale / target.scale,
            offset: (source.offset - target.offset) / target.scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let c = SiRegistry::new().conversion("kg", "kg").unwrap();
        assert_eq!(c.factor, 1.0);
        assert_eq!(c.offset, 0.0);
    }

    #[test]
    fn multiplicative() {
        let c = SiRegistry::new().conversion("kg", "g").unwrap();
        assert_eq!(c.apply(2.0), 2000.0);
        assert_eq!(c.invert(2000.0), 2.0);
    }

    #[test]
    fn affine_fahrenheit_to_celsius() {
        let c = SiRegistry::new().conversion("degF", "degC").unwrap();
        assert!((c.apply(68.0) - 20.0).abs() < 1e-12);
        assert!((c.apply(32.0) - 0.0).abs() < 1e-12);
        assert!((c.invert(100.0) - 212.0).abs() < 1e-12);
    }

    #[test]
    fn affine_celsius_to_kelvin() {
        let c = SiRegistry::new().conversion("degC", "K").unwrap();
        assert!((c.apply(0.0) - 273.15).abs() < 1e-12);
    }

    #[test]
    fn incommensurable() {
        let err = SiRegistry::new().conversion("kg", "s").unwrap_err();
        assert!(matches!(err, UnitError::Dimensionality { .. }));
    }

    #[test]
    fn carbon_flux() {
        // 1 ktC/d over a 365-day year is 365 * 44/12 / 1e6 GtCO2/a.
        let c = SiRegistry::new().conversion("ktC/d", "GtCO2/a").unwrap();
        let expected = 365.0 * 44.0 / 12.0 / 1e6;
        assert!((c.apply(1.0) - expected).abs() < expected * 1e-12);
    }
}
