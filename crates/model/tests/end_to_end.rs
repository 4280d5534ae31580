use helios_model::{Model, ModelError};
use helios_params::{ParameterSet, TimeseriesSpec};
use helios_time::{create_time_points, TimeseriesType};

const YEAR: i64 = 365 * 24 * 3600;

/// A model with zero CO2 emissions over a 10-year yearly grid.
fn zero_emissions_model() -> Model {
    let model = Model::new("one-box").unwrap();
    model
        .parameters()
        .writable_generic("Start Time")
        .unwrap()
        .set(0i64)
        .unwrap();
    model
        .parameters()
        .writable_generic("Stop Time")
        .unwrap()
        .set(10 * YEAR)
        .unwrap();

    let spec = TimeseriesSpec::new(create_time_points(0, YEAR, 10, TimeseriesType::Average))
        .with_timeseries_type(TimeseriesType::Average);
    model
        .parameters()
        .writable_timeseries(["Emissions", "CO2"], "GtCO2/a", &spec)
        .unwrap()
        .set(&[0.0; 10])
        .unwrap();
    model
}

#[test]
fn run_populates_the_atmospheric_pool() {
    let mut model = zero_emissions_model();
    assert_eq!(model.name(), "one-box");
    model.run().unwrap();

    let info = model.output().info(["Pool", "CO2", "Atmosphere"]).unwrap();
    assert_eq!(info.unit.as_deref(), Some("GtC"));

    let spec = TimeseriesSpec::new(create_time_points(0, YEAR, 11, TimeseriesType::Point));
    let pool = model
        .output()
        .timeseries(["Pool", "CO2", "Atmosphere"], "GtC", &spec)
        .unwrap();
    assert!(!pool.is_empty());
    assert_eq!(pool.get().unwrap().len(), 11);
}

#[test]
fn stepping_populates_the_atmospheric_pool() {
    let mut model = zero_emissions_model();
    model.reset_stepping().unwrap();

    assert_eq!(model.step().unwrap(), YEAR);
    assert!(model.output().info(["Pool", "CO2", "Atmosphere"]).is_some());

    assert_eq!(model.step().unwrap(), 2 * YEAR);

    let spec = TimeseriesSpec::new(create_time_points(0, YEAR, 3, TimeseriesType::Point));
    let pool = model
        .output()
        .timeseries(["Pool", "CO2", "Atmosphere"], "GtC", &spec)
        .unwrap();
    assert_eq!(pool.get().unwrap().len(), 3);
}

#[test]
fn emissions_are_converted_into_the_adapter_unit() {
    // 3.67 GtCO2/a is about 1 GtC/yr; cumulative emissions over 10 years
    // come out in carbon mass regardless of the input unit.
    let model = Model::new("one-box").unwrap();
    model
        .parameters()
        .writable_generic("Start Time")
        .unwrap()
        .set(0i64)
        .unwrap();
    model
        .parameters()
        .writable_generic("Stop Time")
        .unwrap()
        .set(10 * YEAR)
        .unwrap();
    let spec = TimeseriesSpec::new(create_time_points(0, YEAR, 10, TimeseriesType::Average))
        .with_timeseries_type(TimeseriesType::Average);
    model
        .parameters()
        .writable_timeseries(["Emissions", "CO2"], "GtCO2/a", &spec)
        .unwrap()
        .set(&[44.0 / 12.0; 10])
        .unwrap();

    let mut model = model;
    model.run().unwrap();

    let point_spec = TimeseriesSpec::new(create_time_points(0, YEAR, 11, TimeseriesType::Point));
    let cumulative = model
        .output()
        .timeseries(["Cumulative Emissions", "CO2"], "GtC", &point_spec)
        .unwrap()
        .get()
        .unwrap();
    assert!((cumulative[10] - 10.0).abs() < 1e-9);
}

#[test]
fn shared_parameter_sets_can_be_injected() {
    let input = ParameterSet::new();
    let output = ParameterSet::new();
    input.writable_generic("Start Time").unwrap().set(0i64).unwrap();
    input
        .writable_generic("Stop Time")
        .unwrap()
        .set(2 * YEAR)
        .unwrap();
    let spec = TimeseriesSpec::new(create_time_points(0, YEAR, 2, TimeseriesType::Average))
        .with_timeseries_type(TimeseriesType::Average);
    input
        .writable_timeseries(["Emissions", "CO2"], "GtC/yr", &spec)
        .unwrap()
        .set(&[1.0, 1.0])
        .unwrap();

    let mut model = Model::with_parameters("one-box", input, output.clone()).unwrap();
    model.run().unwrap();

    // The injected handle sees the outputs directly.
    assert!(output.info(["Surface Temperature"]).is_some());
}

#[test]
fn missing_emissions_fail_the_run() {
    let mut model = Model::new("one-box").unwrap();
    model
        .parameters()
        .writable_generic("Start Time")
        .unwrap()
        .set(0i64)
        .unwrap();
    model
        .parameters()
        .writable_generic("Stop Time")
        .unwrap()
        .set(10 * YEAR)
        .unwrap();

    let err = model.run().unwrap_err();
    assert_eq!(
        err,
        ModelError::MissingInput {
            parameter: "Emissions|CO2".to_string(),
        }
    );
}
