//! Error types for the helios-model crate.

use helios_params::ParameterError;

/// Error type for all fallible operations in the helios-model crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Returned when no adapter is registered under the requested name.
    #[error("no adapter registered for model '{name}'")]
    UnknownModel {
        /// The requested model name.
        name: String,
    },

    /// Returned when a required input parameter has never been written.
    #[error("model requires input parameter {parameter} in order to run")]
    MissingInput {
        /// Full name of the missing parameter.
        parameter: String,
    },

    /// Returned when run or step is called before the run parameters have
    /// been initialized.
    #[error("run parameters have not been initialized")]
    NotInitialized,

    /// Returned when a generic run-period parameter does not hold an
    /// integer time.
    #[error("parameter {parameter} does not hold an integer time")]
    NotATime {
        /// Full name of the offending parameter.
        parameter: String,
    },

    /// Returned when the configured run period is empty or inverted.
    #[error("stop time {stop} is not after start time {start}")]
    EmptyRunPeriod {
        /// Configured start of the run, in seconds.
        start: i64,
        /// Configured stop of the run, in seconds.
        stop: i64,
    },

    /// Parameter store failure (missing data, conversion, structural locks).
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_model() {
        let e = ModelError::UnknownModel {
            name: "magicc".to_string(),
        };
        assert_eq!(e.to_string(), "no adapter registered for model 'magicc'");
    }

    #[test]
    fn error_missing_input() {
        let e = ModelError::MissingInput {
            parameter: "Emissions|CO2".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "model requires input parameter Emissions|CO2 in order to run"
        );
    }

    #[test]
    fn parameter_error_wraps_transparently() {
        let e: ModelError = ParameterError::Empty {
            parameter: "Start Time".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "parameter Start Time is required but empty");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ModelError>();
    }
}
