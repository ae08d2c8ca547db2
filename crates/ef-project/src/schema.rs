//! Search definition schema.

use ef_core::{EfResult, parse_eng, units::symbols};
use ef_series::{DecadeRange, ESeries};
use ef_solver::{Tolerance, Topology};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchProject {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub searches: Vec<SearchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target: ValueDef,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_series")]
    pub series: ESeries,
    #[serde(default)]
    pub decades: DecadeRange,
    #[serde(default = "default_arity")]
    pub arity: usize,
    #[serde(default)]
    pub allow_fewer: bool,
    pub topology: Topology,
    #[serde(default)]
    pub tolerance: ToleranceDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// A number, or text in engineering notation such as `4k7` or `100n`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
}

impl ValueDef {
    pub fn resolve(&self) -> EfResult<f64> {
        match self {
            ValueDef::Number(v) => Ok(*v),
            ValueDef::Text(text) => parse_eng(text),
        }
    }
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        ValueDef::Number(v)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToleranceDef {
    Relative { value: f64 },
    Absolute { value: f64 },
}

impl Default for ToleranceDef {
    fn default() -> Self {
        ToleranceDef::Relative { value: 0.01 }
    }
}

impl ToleranceDef {
    pub fn value(&self) -> f64 {
        match *self {
            ToleranceDef::Relative { value } | ToleranceDef::Absolute { value } => value,
        }
    }
}

impl From<ToleranceDef> for Tolerance {
    fn from(def: ToleranceDef) -> Self {
        match def {
            ToleranceDef::Relative { value } => Tolerance::Relative(value),
            ToleranceDef::Absolute { value } => Tolerance::Absolute(value),
        }
    }
}

fn default_unit() -> String {
    symbols::OHM.to_string()
}

fn default_series() -> ESeries {
    ESeries::E24
}

fn default_arity() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_search_uses_defaults() {
        let yaml = r#"
id: r_total
target: 4k7
topology: series
"#;
        let def: SearchDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.unit, "Ω");
        assert_eq!(def.series, ESeries::E24);
        assert_eq!(def.decades, DecadeRange::default());
        assert_eq!(def.arity, 2);
        assert!(!def.allow_fewer);
        assert_eq!(def.tolerance, ToleranceDef::Relative { value: 0.01 });
        assert!((def.target.resolve().unwrap() - 4700.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_target_and_tagged_tolerance() {
        let yaml = r#"
id: ratio
target: 0.25
unit: ""
series: E96
decades: { min_exp: 3, max_exp: 5 }
topology: divider
tolerance: { type: absolute, value: 0.001 }
limit: 5
"#;
        let def: SearchDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.target, ValueDef::Number(0.25));
        assert_eq!(def.topology, Topology::Divider);
        assert_eq!(Tolerance::from(def.tolerance), Tolerance::Absolute(0.001));
        assert_eq!(def.limit, Some(5));
    }
}
