//! Parameter typing and metadata.

use std::fmt;

use helios_time::TimeseriesType;

/// The established type of a parameter, fixed by its first read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// A single floating-point value.
    Scalar,
    /// A timeseries of instantaneous samples.
    PointTimeseries,
    /// A timeseries of interval averages.
    AverageTimeseries,
    /// An opaque generic value (no unit or time semantics).
    Generic,
}

impl ParameterType {
    /// The timeseries convention of this type, if it is a timeseries.
    pub fn timeseries_type(&self) -> Option<TimeseriesType> {
        match self {
            ParameterType::PointTimeseries => Some(TimeseriesType::Point),
            ParameterType::AverageTimeseries => Some(TimeseriesType::Average),
            ParameterType::Scalar | ParameterType::Generic => None,
        }
    }

    /// The parameter type corresponding to a timeseries convention.
    pub fn from_timeseries_type(timeseries_type: TimeseriesType) -> Self {
        match timeseries_type {
            TimeseriesType::Point => ParameterType::PointTimeseries,
            TimeseriesType::Average => ParameterType::AverageTimeseries,
        }
    }

    /// Whether the type carries a time grid.
    pub fn is_timeseries(&self) -> bool {
        self.timeseries_type().is_some()
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterType::Scalar => "scalar",
            ParameterType::PointTimeseries => "point timeseries",
            ParameterType::AverageTimeseries => "average timeseries",
            ParameterType::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// An opaque value stored in a generic parameter.
///
/// Generic parameters bypass unit and time conversion entirely; they exist
/// for run configuration such as start/stop times or option switches.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue {
    /// A boolean switch.
    Bool(bool),
    /// An integer, also used for absolute times in seconds.
    Integer(i64),
    /// A floating-point value without unit semantics.
    Float(f64),
    /// A free-form string.
    String(String),
}

impl GenericValue {
    /// The contained integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            GenericValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained float, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            GenericValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            GenericValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GenericValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for GenericValue {
    fn from(v: bool) -> Self {
        GenericValue::Bool(v)
    }
}

impl From<i64> for GenericValue {
    fn from(v: i64) -> Self {
        GenericValue::Integer(v)
    }
}

impl From<f64> for GenericValue {
    fn from(v: f64) -> Self {
        GenericValue::Float(v)
    }
}

impl From<&str> for GenericValue {
    fn from(v: &str) -> Self {
        GenericValue::String(v.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(v: String) -> Self {
        GenericValue::String(v)
    }
}

/// Metadata describing a parameter node.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Full name of the parameter within its region.
    pub name: Vec<String>,
    /// Full name of the owning region.
    pub region: Vec<String>,
    /// Unit established by the first access, if any.
    pub unit: Option<String>,
    /// Type established by the first access, if any.
    pub parameter_type: Option<ParameterType>,
}

/// Metadata describing a region node.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    /// Name segment of the region.
    pub name: String,
    /// Full path from the root region.
    pub full_name: Vec<String>,
    /// Whether the region has been aggregated over.
    pub aggregated: bool,
}
