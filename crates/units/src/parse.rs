//! Unit expression parsing and dimensional analysis.
//!
//! An expression is a sequence of factors joined by `*` and `/`, where each
//! factor is an optional SI prefix, a base symbol, and an optional integer
//! power (`m^2`, `s^-1`). Whitespace around operators is ignored.

use crate::error::UnitError;

/// Exponent vector over the base dimensions used in this registry.
///
/// Energy and power are derived (`J = kg m^2 / s^2`). Carbon mass is its own
/// dimension so that `GtC` and `kg` do not silently convert into each other,
/// while `C` and `CO2` remain commensurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub temperature: i8,
    pub current: i8,
    pub carbon: i8,
}

impl Dimension {
    const fn new(mass: i8, length: i8, time: i8, temperature: i8, current: i8, carbon: i8) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
            current,
            carbon,
        }
    }

    /// Accumulates `other` raised to `exp` into `self`.
    fn accumulate(&mut self, other: Dimension, exp: i8) {
        self.mass += other.mass * exp;
        self.length += other.length * exp;
        self.time += other.time * exp;
        self.temperature += other.temperature * exp;
        self.current += other.current * exp;
        self.carbon += other.carbon * exp;
    }

    fn is_dimensionless(&self) -> bool {
        *self == Dimension::default()
    }
}

/// A fully reduced unit expression: scale and offset into canonical units
/// (gram, metre, second, kelvin, ampere, gram-carbon) plus a dimension vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParsedUnit {
    pub scale: f64,
    pub offset: f64,
    pub dim: Dimension,
}

/// Seconds per 365-day year, the calendar convention used throughout.
const SECONDS_PER_YEAR: f64 = 365.0 * 86_400.0;

/// Grams of CO2 per gram of carbon (molar-mass ratio).
const CO2_PER_C: f64 = 44.0 / 12.0;

struct BaseUnit {
    symbol: &'static str,
    scale: f64,
    offset: f64,
    dim: Dimension,
}

const DIMENSIONLESS: Dimension = Dimension::new(0, 0, 0, 0, 0, 0);
const MASS: Dimension = Dimension::new(1, 0, 0, 0, 0, 0);
const LENGTH: Dimension = Dimension::new(0, 1, 0, 0, 0, 0);
const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0);
const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0, 0);
const CURRENT: Dimension = Dimension::new(0, 0, 0, 0, 1, 0);
const CARBON: Dimension = Dimension::new(0, 0, 0, 0, 0, 1);
const ENERGY: Dimension = Dimension::new(1, 2, -2, 0, 0, 0);
const POWER: Dimension = Dimension::new(1, 2, -3, 0, 0, 0);

/// Base symbol table. Exact symbol matches take priority over prefix
/// decomposition, so `min` is minutes rather than milli-inches.
const BASE_UNITS: &[BaseUnit] = &[
    // Mass (canonical: gram).
    BaseUnit { symbol: "g", scale: 1.0, offset: 0.0, dim: MASS },
    BaseUnit { symbol: "t", scale: 1e6, offset: 0.0, dim: MASS },
    // Carbon mass (canonical: gram of carbon). CO2 is expressed as the
    // equivalent carbon content, hence the 12/44 scale.
    BaseUnit { symbol: "C", scale: 1.0, offset: 0.0, dim: CARBON },
    BaseUnit { symbol: "gC", scale: 1.0, offset: 0.0, dim: CARBON },
    BaseUnit { symbol: "tC", scale: 1e6, offset: 0.0, dim: CARBON },
    BaseUnit { symbol: "CO2", scale: 1.0 / CO2_PER_C, offset: 0.0, dim: CARBON },
    BaseUnit { symbol: "gCO2", scale: 1.0 / CO2_PER_C, offset: 0.0, dim: CARBON },
    BaseUnit { symbol: "tCO2", scale: 1e6 / CO2_PER_C, offset: 0.0, dim: CARBON },
    // Time (canonical: second). Years follow the 365-day calendar.
    BaseUnit { symbol: "s", scale: 1.0, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "min", scale: 60.0, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "h", scale: 3600.0, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "d", scale: 86_400.0, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "a", scale: SECONDS_PER_YEAR, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "yr", scale: SECONDS_PER_YEAR, offset: 0.0, dim: TIME },
    BaseUnit { symbol: "year", scale: SECONDS_PER_YEAR, offset: 0.0, dim: TIME },
    // Temperature (canonical: kelvin). degC and degF are affine.
    BaseUnit { symbol: "K", scale: 1.0, offset: 0.0, dim: TEMPERATURE },
    BaseUnit { symbol: "degC", scale: 1.0, offset: 273.15, dim: TEMPERATURE },
    BaseUnit { symbol: "degF", scale: 5.0 / 9.0, offset: 459.67 * 5.0 / 9.0, dim: TEMPERATURE },
    // Length.
    BaseUnit { symbol: "m", scale: 1.0, offset: 0.0, dim: LENGTH },
    // Electric current.
    BaseUnit { symbol: "A", scale: 1.0, offset: 0.0, dim: CURRENT },
    // Derived: energy and power relative to gram-based canonical mass.
    BaseUnit { symbol: "J", scale: 1e3, offset: 0.0, dim: ENERGY },
    BaseUnit { symbol: "W", scale: 1e3, offset: 0.0, dim: POWER },
    // Dimensionless.
    BaseUnit { symbol: "ppm", scale: 1e-6, offset: 0.0, dim: DIMENSIONLESS },
    BaseUnit { symbol: "ppb", scale: 1e-9, offset: 0.0, dim: DIMENSIONLESS },
    BaseUnit { symbol: "dimensionless", scale: 1.0, offset: 0.0, dim: DIMENSIONLESS },
];

const PREFIXES: &[(&str, f64)] = &[
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
];

/// One multiplicative factor of an expression: `prefix? base (^exp)?`.
struct Factor {
    scale: f64,
    offset: f64,
    dim: Dimension,
    exp: i8,
    prefixed: bool,
}

fn lookup_base(symbol: &str) -> Option<&'static BaseUnit> {
    BASE_UNITS.iter().find(|b| b.symbol == symbol)
}

fn parse_factor(token: &str, exp_sign: i8, expr: &str) -> Result<Factor, UnitError> {
    let (symbol, exp) = match token.split_once('^') {
        Some((symbol, exp_str)) => {
            let exp: i8 = exp_str.parse().map_err(|_| UnitError::InvalidExpression {
                expr: expr.to_string(),
                reason: "exponent must be a small integer",
            })?;
            (symbol, exp)
        }
        None => (token, 1),
    };

    if symbol.is_empty() {
        return Err(UnitError::InvalidExpression {
            expr: expr.to_string(),
            reason: "empty factor",
        });
    }

    // Exact base match first, then a single SI prefix plus a base.
    let (prefix_scale, base, prefixed) = if let Some(base) = lookup_base(symbol) {
        (1.0, base, false)
    } else {
        PREFIXES
            .iter()
            .find_map(|&(p, scale)| {
                symbol
                    .strip_prefix(p)
                    .and_then(lookup_base)
                    .map(|base| (scale, base, true))
            })
            .ok_or_else(|| UnitError::UnknownUnit {
                unit: symbol.to_string(),
            })?
    };

    Ok(Factor {
        scale: prefix_scale * base.scale,
        offset: base.offset,
        dim: base.dim,
        exp: exp * exp_sign,
        prefixed,
    })
}

/// Parses a unit expression into a canonical scale, offset and dimension.
///
/// The empty string and `"dimensionless"` both parse to the dimensionless
/// identity. An affine base (`degC`, `degF`) is only valid as the entire
/// expression with exponent 1; in compounds the offset has no meaning.
pub(crate) fn parse_unit(expr: &str) -> Result<ParsedUnit, UnitError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Ok(ParsedUnit {
            scale: 1.0,
            offset: 0.0,
            dim: Dimension::default(),
        });
    }

    let mut factors = Vec::new();
    let mut rest = trimmed;
    let mut sign: i8 = 1;
    loop {
        match rest.find(['*', '/']) {
            Some(idx) => {
                factors.push((rest[..idx].trim(), sign));
                sign = if rest.as_bytes()[idx] == b'/' { -1 } else { sign };
                rest = &rest[idx + 1..];
            }
            None => {
                factors.push((rest.trim(), sign));
                break;
            }
        }
    }

    let mut scale = 1.0;
    let mut dim = Dimension::default();
    let mut affine: Option<f64> = None;
    let single_factor = factors.len() == 1;

    for (token, exp_sign) in factors {
        let factor = parse_factor(token, exp_sign, trimmed)?;
        if factor.offset != 0.0 {
            if !single_factor || factor.exp != 1 || factor.prefixed {
                return Err(UnitError::InvalidExpression {
                    expr: trimmed.to_string(),
                    reason: "affine units cannot appear in compound expressions",
                });
            }
            affine = Some(factor.offset);
        }
        scale *= factor.scale.powi(factor.exp as i32);
        dim.accumulate(factor.dim, factor.exp);
    }

    Ok(ParsedUnit {
        scale,
        offset: affine.unwrap_or(0.0),
        dim,
    })
}

/// Returns whether two parsed units share a dimension vector.
pub(crate) fn commensurable(a: &ParsedUnit, b: &ParsedUnit) -> bool {
    a.dim == b.dim || (a.dim.is_dimensionless() && b.dim.is_dimensionless())
}
