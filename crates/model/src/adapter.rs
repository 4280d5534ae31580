//! The adapter capability contract and registry.

use helios_params::ParameterSet;
use helios_time::Time;

use crate::error::ModelError;
use crate::onebox::OneBox;

/// Capability contract between the run orchestrator and a model plugin.
///
/// An adapter pulls its inputs from one [`ParameterSet`] and pushes its
/// outputs to another. The orchestrator drives the methods in a fixed
/// sequence: [`initialize_model_input`](Adapter::initialize_model_input),
/// then [`initialize_run_parameters`](Adapter::initialize_run_parameters),
/// then [`reset`](Adapter::reset), then either a single
/// [`run`](Adapter::run) or repeated [`step`](Adapter::step) calls.
pub trait Adapter {
    /// Prepares model input that does not depend on the run period, writing
    /// default values for inputs nobody has set.
    fn initialize_model_input(&mut self) -> Result<(), ModelError>;

    /// Reads all run-period-dependent inputs for a run from `start` to
    /// `stop` (both in seconds).
    fn initialize_run_parameters(&mut self, start: Time, stop: Time) -> Result<(), ModelError>;

    /// Resets the model state to the start of the run period.
    fn reset(&mut self) -> Result<(), ModelError>;

    /// Runs over the full period and writes all outputs.
    fn run(&mut self) -> Result<(), ModelError>;

    /// Advances one time step, updates the outputs written so far and
    /// returns the current model time.
    fn step(&mut self) -> Result<Time, ModelError>;
}

/// Names of all registered adapters.
pub fn adapter_names() -> &'static [&'static str] {
    &["one-box"]
}

/// Instantiates the adapter registered under `name`, wired to the given
/// input and output parameter sets.
///
/// # Errors
///
/// Returns [`ModelError::UnknownModel`] for an unregistered name.
pub fn load_adapter(
    name: &str,
    input: &ParameterSet,
    output: &ParameterSet,
) -> Result<Box<dyn Adapter>, ModelError> {
    match name {
        "one-box" => Ok(Box::new(OneBox::new(input.clone(), output.clone()))),
        other => Err(ModelError::UnknownModel {
            name: other.to_string(),
        }),
    }
}
