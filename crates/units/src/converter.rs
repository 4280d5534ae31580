//! Bidirectional unit conversion between a fixed source/target pair.

use crate::error::UnitError;
use crate::registry::{Conversion, SiRegistry, UnitRegistry};

/// Converts values between a source unit and a target unit.
///
/// The conversion is resolved once at construction time; applying it is a
/// multiply-add, so converters are cheap to use in per-element loops.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    source: String,
    target: String,
    conversion: Conversion,
}

impl UnitConverter {
    /// Creates a converter using the built-in [`SiRegistry`].
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Dimensionality`] if the units are not
    /// commensurable, or a parse error for invalid unit strings.
    pub fn new(source: &str, target: &str) -> Result<Self, UnitError> {
        Self::with_registry(source, target, &SiRegistry::new())
    }

    /// Creates a converter backed by a caller-supplied registry.
    pub fn with_registry(
        source: &str,
        target: &str,
        registry: &dyn UnitRegistry,
    ) -> Result<Self, UnitError> {
        let conversion = registry.conversion(source, target)?;
        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
            conversion,
        })
    }

    /// Converts a value expressed in source units into target units.
    pub fn convert_from(&self, value: f64) -> f64 {
        self.conversion.apply(value)
    }

    /// Converts a value expressed in target units back into source units.
    pub fn convert_to(&self, value: f64) -> f64 {
        self.conversion.invert(value)
    }

    /// Converts a slice of source-unit values into target units.
    pub fn convert_from_slice(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.convert_from(v)).collect()
    }

    /// Converts a slice of target-unit values back into source units.
    pub fn convert_to_slice(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.convert_to(v)).collect()
    }

    /// The source unit string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The target unit string.
    pub fn target(&self) -> &str {
        &self.target
    }
}
