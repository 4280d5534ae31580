use serde::Deserialize;

/// Top-level Helios configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeliosConfig {
    /// Name of the model adapter to run.
    #[serde(default = "default_model")]
    pub model: String,

    /// Run period settings.
    #[serde(default)]
    pub run: RunToml,

    /// Emissions scenario settings.
    pub emissions: EmissionsToml,

    /// Scalar model constant overrides.
    #[serde(default)]
    pub constants: Vec<ConstantToml>,
}

/// `[run]` section: the run period in seconds since epoch.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    /// Start of the run period.
    #[serde(default)]
    pub start_time: i64,

    /// End of the run period.
    #[serde(default = "default_stop_time")]
    pub stop_time: i64,
}

impl Default for RunToml {
    fn default() -> Self {
        RunToml {
            start_time: 0,
            stop_time: default_stop_time(),
        }
    }
}

/// `[emissions]` section: an average CO2 emissions series spread evenly
/// over the run period.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmissionsToml {
    /// Unit of the values (anything commensurable with GtC/yr).
    #[serde(default = "default_emissions_unit")]
    pub unit: String,

    /// One interval-average value per equally sized interval.
    pub values: Vec<f64>,
}

/// `[[constants]]` entries: scalar inputs written before the run.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantToml {
    /// Parameter path, `|`-separated (e.g. "Equilibrium Climate Sensitivity").
    pub name: String,

    /// Unit of the value.
    pub unit: String,

    /// The value to write.
    pub value: f64,
}

fn default_model() -> String {
    "one-box".to_string()
}

fn default_stop_time() -> i64 {
    // Ten years.
    10 * 365 * 24 * 3600
}

fn default_emissions_unit() -> String {
    "GtC/yr".to_string()
}
