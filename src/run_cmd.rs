use std::fs;

use anyhow::{bail, Context, Result};
use tracing::info;

use helios_model::Model;
use helios_params::TimeseriesSpec;
use helios_time::TimeseriesType;

use crate::cli::RunArgs;
use crate::config::HeliosConfig;

/// Run a model from a TOML scenario configuration.
pub fn run(args: RunArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: HeliosConfig = toml::from_str(&raw)
        .with_context(|| format!("invalid config: {}", args.config.display()))?;
    let model_name = args.model.as_deref().unwrap_or(&config.model);

    let mut model = Model::new(model_name)?;
    write_inputs(&model, &config)?;

    info!(model = model_name, "starting run");
    model.run()?;

    for name in [
        "Pool|CO2|Atmosphere",
        "Atmospheric Concentrations|CO2",
        "Surface Temperature",
        "Cumulative Emissions|CO2",
    ] {
        if let Some(info) = model.output().info(name) {
            info!(
                parameter = name,
                unit = info.unit.as_deref().unwrap_or("unknown"),
                "output available"
            );
        }
    }
    Ok(())
}

/// Writes run period, emissions and constant overrides into the input set.
fn write_inputs(model: &Model, config: &HeliosConfig) -> Result<()> {
    let start = config.run.start_time;
    let stop = config.run.stop_time;
    if stop <= start {
        bail!("stop_time must be after start_time");
    }

    let parameters = model.parameters();
    parameters.writable_generic("Start Time")?.set(start)?;
    parameters.writable_generic("Stop Time")?.set(stop)?;

    let intervals = config.emissions.values.len();
    if intervals == 0 {
        bail!("emissions values must not be empty");
    }
    let span = stop - start;
    let step = span / intervals as i64;
    if step * intervals as i64 != span {
        bail!("{intervals} emissions values do not divide the run period evenly");
    }
    let boundaries: Vec<i64> = (0..=intervals as i64).map(|i| start + step * i).collect();
    let spec =
        TimeseriesSpec::new(boundaries).with_timeseries_type(TimeseriesType::Average);
    parameters
        .writable_timeseries(["Emissions", "CO2"], &config.emissions.unit, &spec)?
        .set(&config.emissions.values)?;

    for constant in &config.constants {
        parameters
            .writable_scalar(constant.name.as_str(), &constant.unit)?
            .set(constant.value)?;
    }
    Ok(())
}
