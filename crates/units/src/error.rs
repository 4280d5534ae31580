//! Error types for the helios-units crate.

/// Error type for all fallible operations in the helios-units crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Returned when a unit symbol is not known to the registry.
    #[error("unknown unit: {unit}")]
    UnknownUnit {
        /// The unrecognised unit symbol.
        unit: String,
    },

    /// Returned when source and target units are not commensurable.
    ///
    /// The unit fields avoid the name `source`, which thiserror reserves
    /// for the error-chain cause.
    #[error("cannot convert from {source_unit} to {target_unit}: incompatible dimensions")]
    Dimensionality {
        /// The source unit string.
        source_unit: String,
        /// The target unit string.
        target_unit: String,
    },

    /// Returned when a unit expression cannot be parsed.
    #[error("invalid unit expression '{expr}': {reason}")]
    InvalidExpression {
        /// The offending expression.
        expr: String,
        /// Why the expression was rejected.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_unit() {
        let e = UnitError::UnknownUnit {
            unit: "foo".to_string(),
        };
        assert_eq!(e.to_string(), "unknown unit: foo");
    }

    #[test]
    fn error_dimensionality() {
        let e = UnitError::Dimensionality {
            source_unit: "kg".to_string(),
            target_unit: "s".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "cannot convert from kg to s: incompatible dimensions"
        );
    }

    #[test]
    fn error_invalid_expression() {
        let e = UnitError::InvalidExpression {
            expr: "degC/m".to_string(),
            reason: "affine units cannot appear in compound expressions",
        };
        assert_eq!(
            e.to_string(),
            "invalid unit expression 'degC/m': affine units cannot appear in compound expressions"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<UnitError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<UnitError>();
    }
}
