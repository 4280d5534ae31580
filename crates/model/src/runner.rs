//! Run orchestration for a single model.

use helios_params::{GenericValue, ParameterSet};
use helios_time::Time;
use tracing::{info, instrument};

use crate::adapter::{load_adapter, Adapter};
use crate::error::ModelError;

/// A model wired to its input and output parameter sets.
///
/// The run period comes from the generic input parameters `Start Time` and
/// `Stop Time` (integers, seconds). Both must be set before
/// [`run`](Self::run) or [`reset_stepping`](Self::reset_stepping).
pub struct Model {
    name: String,
    input: ParameterSet,
    output: ParameterSet,
    adapter: Box<dyn Adapter>,
}

impl Model {
    /// Creates a model with fresh input and output parameter sets.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        Self::with_parameters(name, ParameterSet::new(), ParameterSet::new())
    }

    /// Creates a model on existing parameter sets.
    pub fn with_parameters(
        name: &str,
        input: ParameterSet,
        output: ParameterSet,
    ) -> Result<Self, ModelError> {
        let adapter = load_adapter(name, &input, &output)?;
        Ok(Model {
            name: name.to_string(),
            input,
            output,
            adapter,
        })
    }

    /// Name of the model being run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model's input parameter set.
    pub fn parameters(&self) -> &ParameterSet {
        &self.input
    }

    /// The model's output parameter set.
    pub fn output(&self) -> &ParameterSet {
        &self.output
    }

    /// Initializes the adapter and resets it to the start of the run
    /// period, ready for stepping.
    pub fn reset_stepping(&mut self) -> Result<(), ModelError> {
        let (start, stop) = self.run_period()?;
        self.adapter.initialize_model_input()?;
        self.adapter.initialize_run_parameters(start, stop)?;
        self.adapter.reset()
    }

    /// Runs the model over the full run period.
    #[instrument(skip_all, fields(model = %self.name))]
    pub fn run(&mut self) -> Result<(), ModelError> {
        self.reset_stepping()?;
        self.adapter.run()?;
        info!("model run finished");
        Ok(())
    }

    /// Advances the model one time step and returns the current time.
    pub fn step(&mut self) -> Result<Time, ModelError> {
        self.adapter.step()
    }

    fn run_period(&self) -> Result<(Time, Time), ModelError> {
        let start = self.generic_time("Start Time")?;
        let stop = self.generic_time("Stop Time")?;
        if stop <= start {
            return Err(ModelError::EmptyRunPeriod { start, stop });
        }
        Ok((start, stop))
    }

    fn generic_time(&self, name: &str) -> Result<Time, ModelError> {
        match self.input.generic(name)?.get()? {
            GenericValue::Integer(value) => Ok(value),
            _ => Err(ModelError::NotATime {
                parameter: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_fails_at_construction() {
        // unwrap_err would need `Model: Debug`.
        let err = Model::new("magicc").err().unwrap();
        assert!(matches!(err, ModelError::UnknownModel { .. }));
    }

    #[test]
    fn missing_run_period_is_reported() {
        let mut model = Model::new("one-box").unwrap();
        let err = model.run().unwrap_err();
        assert!(matches!(
            err,
            ModelError::Parameter(helios_params::ParameterError::Empty { .. })
        ));
    }

    #[test]
    fn inverted_run_period_is_rejected() {
        let model = Model::new("one-box").unwrap();
        model
            .parameters()
            .writable_generic("Start Time")
            .unwrap()
            .set(100i64)
            .unwrap();
        model
            .parameters()
            .writable_generic("Stop Time")
            .unwrap()
            .set(50i64)
            .unwrap();

        let mut model = model;
        let err = model.run().unwrap_err();
        assert_eq!(
            err,
            ModelError::EmptyRunPeriod {
                start: 100,
                stop: 50,
            }
        );
    }

    #[test]
    fn non_integer_run_period_is_rejected() {
        let mut model = Model::new("one-box").unwrap();
        model
            .parameters()
            .writable_generic("Start Time")
            .unwrap()
            .set("1750-01-01")
            .unwrap();
        model
            .parameters()
            .writable_generic("Stop Time")
            .unwrap()
            .set(100i64)
            .unwrap();

        let err = model.run().unwrap_err();
        assert_eq!(
            err,
            ModelError::NotATime {
                parameter: "Start Time".to_string(),
            }
        );
    }
}
