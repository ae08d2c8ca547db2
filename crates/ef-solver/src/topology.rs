//! Built-in combination formulas.

use ef_core::{EfError, EfResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a tuple of component values combines into one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Sum: resistors or inductors in series, capacitors in parallel.
    Series,
    /// Reciprocal of summed reciprocals: resistors in parallel, capacitors in series.
    Parallel,
    /// `last / sum`: output ratio of a divider whose bottom leg is the last value.
    Divider,
}

impl Topology {
    pub const ALL: [Topology; 3] = [Topology::Series, Topology::Parallel, Topology::Divider];

    pub fn evaluate(self, values: &[f64]) -> f64 {
        match self {
            Topology::Series => values.iter().sum(),
            Topology::Parallel => 1.0 / values.iter().map(|v| v.recip()).sum::<f64>(),
            Topology::Divider => match values.last() {
                Some(bottom) => bottom / values.iter().sum::<f64>(),
                None => f64::NAN,
            },
        }
    }

    /// Whether reordering the values can change the result.
    pub fn is_symmetric(self) -> bool {
        !matches!(self, Topology::Divider)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Series => write!(f, "series"),
            Topology::Parallel => write!(f, "parallel"),
            Topology::Divider => write!(f, "divider"),
        }
    }
}

impl FromStr for Topology {
    type Err = EfError;

    fn from_str(s: &str) -> EfResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "series" | "sum" => Ok(Topology::Series),
            "parallel" => Ok(Topology::Parallel),
            "divider" | "ratio" => Ok(Topology::Divider),
            _ => Err(EfError::Parse {
                input: s.to_string(),
                what: "a topology (series, parallel, divider)",
            }),
        }
    }
}
