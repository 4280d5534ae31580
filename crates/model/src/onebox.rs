//! A one-box carbon-cycle and energy-balance reference adapter.
//!
//! The physics is deliberately minimal (a single well-mixed atmospheric
//! carbon pool relaxing towards its pre-industrial size, and a surface
//! temperature relaxing towards the logarithmic equilibrium response). The
//! adapter exists to exercise the coupling layer, not to project climate.

use helios_params::{ParameterSet, TimeseriesSpec};
use helios_time::{create_time_points, Time, TimeseriesType};
use tracing::{debug, info};

use crate::adapter::Adapter;
use crate::error::ModelError;

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;
const TIMESTEP: i64 = 365 * 24 * 3600;

/// Concentration increase per unit of atmospheric carbon.
const PPM_PER_GTC: f64 = 0.471;

/// A scalar model constant, its canonical parameter path and its default.
struct ScalarInput {
    path: &'static str,
    unit: &'static str,
    default: f64,
}

/// All scalar constants the model consumes, declared statically so callers
/// can discover and override them by path.
const SCALAR_INPUTS: &[ScalarInput] = &[
    ScalarInput {
        path: "Equilibrium Climate Sensitivity",
        unit: "K",
        default: 3.0,
    },
    ScalarInput {
        path: "Pre-industrial Atmospheric Concentrations|CO2",
        unit: "ppm",
        default: 278.0,
    },
    ScalarInput {
        path: "Pre-industrial Surface Temperature",
        unit: "K",
        default: 287.75,
    },
    ScalarInput {
        path: "Ocean Uptake Timescale",
        unit: "a",
        default: 100.0,
    },
    ScalarInput {
        path: "Temperature Response Time",
        unit: "a",
        default: 40.0,
    },
];

const EMISSIONS_PATH: &str = "Emissions|CO2";
const EMISSIONS_UNIT: &str = "GtC/yr";

struct OutputField {
    path: &'static str,
    unit: &'static str,
}

const OUTPUTS: &[OutputField] = &[
    OutputField {
        path: "Pool|CO2|Atmosphere",
        unit: "GtC",
    },
    OutputField {
        path: "Atmospheric Concentrations|CO2",
        unit: "ppm",
    },
    OutputField {
        path: "Surface Temperature",
        unit: "K",
    },
    OutputField {
        path: "Cumulative Emissions|CO2",
        unit: "GtC",
    },
];

#[derive(Debug, Clone, Copy, Default)]
struct Constants {
    sensitivity: f64,
    preindustrial_concentration: f64,
    preindustrial_temperature: f64,
    ocean_timescale: f64,
    response_time: f64,
}

/// Per-run state, created by `initialize_run_parameters`.
#[derive(Debug)]
struct RunState {
    start: Time,
    /// Interval boundaries, `steps + 1` points spaced `TIMESTEP` apart.
    boundaries: Vec<Time>,
    /// Average emissions per interval, in GtC/yr.
    emissions: Vec<f64>,
    constants: Constants,
    /// Completed steps since the last reset.
    index: usize,
    pool: Vec<f64>,
    concentration: Vec<f64>,
    temperature: Vec<f64>,
    cumulative: Vec<f64>,
}

/// One-box reference adapter.
pub struct OneBox {
    input: ParameterSet,
    output: ParameterSet,
    run: Option<RunState>,
}

impl OneBox {
    pub fn new(input: ParameterSet, output: ParameterSet) -> Self {
        OneBox {
            input,
            output,
            run: None,
        }
    }

    fn read_constant(&self, input: &ScalarInput) -> Result<f64, ModelError> {
        Ok(self.input.scalar(input.path, input.unit)?.get()?)
    }

    fn run_state(&mut self) -> Result<&mut RunState, ModelError> {
        self.run.as_mut().ok_or(ModelError::NotInitialized)
    }

    /// Writes all output series up to the current step boundary.
    fn write_outputs(&self) -> Result<(), ModelError> {
        let state = self.run.as_ref().ok_or(ModelError::NotInitialized)?;
        let upto = state.index + 1;
        let spec = TimeseriesSpec::new(state.boundaries[..upto].to_vec());
        let series = [
            &state.pool,
            &state.concentration,
            &state.temperature,
            &state.cumulative,
        ];
        for (field, values) in OUTPUTS.iter().zip(series) {
            self.output
                .writable_timeseries(field.path, field.unit, &spec)?
                .set(&values[..upto])?;
        }
        Ok(())
    }

    fn advance(state: &mut RunState) {
        let dt = TIMESTEP as f64 / SECONDS_PER_YEAR;
        let c = &state.constants;
        let pool0 = c.preindustrial_concentration / PPM_PER_GTC;

        let emissions = state.emissions[state.index];
        let pool = state.pool[state.index];
        let uptake = (pool - pool0) / c.ocean_timescale;
        let next_pool = pool + (emissions - uptake) * dt;
        let concentration = next_pool * PPM_PER_GTC;

        let equilibrium = c.preindustrial_temperature
            + c.sensitivity * (concentration / c.preindustrial_concentration).ln()
                / std::f64::consts::LN_2;
        let temperature = state.temperature[state.index];
        let next_temperature = temperature + (equilibrium - temperature) * dt / c.response_time;

        state.pool.push(next_pool);
        state.concentration.push(concentration);
        state.temperature.push(next_temperature);
        state
            .cumulative
            .push(state.cumulative[state.index] + emissions * dt);
        state.index += 1;
    }
}

impl Adapter for OneBox {
    /// Writes the default value of every scalar constant nobody has set.
    fn initialize_model_input(&mut self) -> Result<(), ModelError> {
        for input in SCALAR_INPUTS {
            let view = self.input.scalar(input.path, input.unit)?;
            if view.is_empty() {
                debug!(
                    parameter = input.path,
                    default = input.default,
                    "using default model constant"
                );
                self.input
                    .writable_scalar(input.path, input.unit)?
                    .set(input.default)?;
            }
        }
        Ok(())
    }

    fn initialize_run_parameters(&mut self, start: Time, stop: Time) -> Result<(), ModelError> {
        if stop <= start {
            return Err(ModelError::EmptyRunPeriod { start, stop });
        }
        let steps = ((stop - start) / TIMESTEP).max(1) as usize;
        let boundaries = create_time_points(start, TIMESTEP, steps, TimeseriesType::Average);

        let spec = TimeseriesSpec::new(boundaries.clone())
            .with_timeseries_type(TimeseriesType::Average);
        let view = self.input.timeseries(EMISSIONS_PATH, EMISSIONS_UNIT, &spec)?;
        if view.is_empty() {
            return Err(ModelError::MissingInput {
                parameter: EMISSIONS_PATH.to_string(),
            });
        }
        let emissions = view.get()?;

        let mut constants = Constants::default();
        for input in SCALAR_INPUTS {
            let value = self.read_constant(input)?;
            match input.path {
                "Equilibrium Climate Sensitivity" => constants.sensitivity = value,
                "Pre-industrial Atmospheric Concentrations|CO2" => {
                    constants.preindustrial_concentration = value
                }
                "Pre-industrial Surface Temperature" => {
                    constants.preindustrial_temperature = value
                }
                "Ocean Uptake Timescale" => constants.ocean_timescale = value,
                "Temperature Response Time" => constants.response_time = value,
                _ => {}
            }
        }

        info!(start, stop, steps, "initialized one-box run parameters");
        self.run = Some(RunState {
            start,
            boundaries,
            emissions,
            constants,
            index: 0,
            pool: Vec::new(),
            concentration: Vec::new(),
            temperature: Vec::new(),
            cumulative: Vec::new(),
        });
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ModelError> {
        let state = self.run_state()?;
        let c = state.constants;
        state.index = 0;
        state.pool = vec![c.preindustrial_concentration / PPM_PER_GTC];
        state.concentration = vec![c.preindustrial_concentration];
        state.temperature = vec![c.preindustrial_temperature];
        state.cumulative = vec![0.0];
        Ok(())
    }

    fn run(&mut self) -> Result<(), ModelError> {
        let state = self.run_state()?;
        if state.pool.is_empty() {
            return Err(ModelError::NotInitialized);
        }
        while state.index < state.emissions.len() {
            Self::advance(state);
        }
        self.write_outputs()
    }

    fn step(&mut self) -> Result<Time, ModelError> {
        let state = self.run_state()?;
        if state.pool.is_empty() {
            return Err(ModelError::NotInitialized);
        }
        if state.index < state.emissions.len() {
            Self::advance(state);
        }
        let current = state.start + TIMESTEP * state.index as i64;
        self.write_outputs()?;
        Ok(current)
    }
}
