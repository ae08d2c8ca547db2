//! Decade ranges and enumeration of standard values.

use crate::approx::{MAX_EXPONENT, approximate};
use crate::series::ESeries;
use crate::value::StandardValue;
use ef_core::{EfError, EfResult, ensure_positive};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Inclusive range of power-of-ten exponents, `0..=6` covers 1 to 9.1M for E24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeRange {
    pub min_exp: i32,
    pub max_exp: i32,
}

impl Default for DecadeRange {
    fn default() -> Self {
        Self {
            min_exp: 0,
            max_exp: 6,
        }
    }
}

impl DecadeRange {
    pub fn new(min_exp: i32, max_exp: i32) -> EfResult<Self> {
        let range = Self { min_exp, max_exp };
        range.validate()?;
        Ok(range)
    }

    /// Smallest range whose decades contain both `lo` and `hi`.
    pub fn spanning(lo: f64, hi: f64) -> EfResult<Self> {
        let lo = ensure_positive(lo, "decade lower bound")?;
        let hi = ensure_positive(hi, "decade upper bound")?;
        Self::new(lo.log10().floor() as i32, hi.log10().floor() as i32)
    }

    pub fn validate(&self) -> EfResult<()> {
        for exponent in [self.min_exp, self.max_exp] {
            if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
                return Err(EfError::OutOfRange {
                    value: f64::from(exponent),
                    reason: "decade exponent outside the supported range",
                });
            }
        }
        if self.min_exp > self.max_exp {
            return Err(EfError::InvalidArg {
                what: "decade range min_exp must not exceed max_exp",
            });
        }
        Ok(())
    }

    pub fn exponents(&self) -> RangeInclusive<i32> {
        self.min_exp..=self.max_exp
    }

    /// Number of decades; zero for an inverted range.
    pub fn len(&self) -> usize {
        (i64::from(self.max_exp) - i64::from(self.min_exp) + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, exponent: i32) -> bool {
        self.exponents().contains(&exponent)
    }
}

/// Every standard value of one series inside a bounded range, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardValues {
    series: ESeries,
    values: Vec<StandardValue>,
}

impl StandardValues {
    /// All values of `series` in the decades of `decades`.
    pub fn new(series: ESeries, decades: DecadeRange) -> Self {
        let values = decades
            .exponents()
            .flat_map(|exponent| {
                (0..series.len()).filter_map(move |index| StandardValue::new(series, index, exponent))
            })
            .collect();
        Self { series, values }
    }

    /// Values from the one at or below `min` up to the last one not above `max`.
    ///
    /// The first value may sit slightly under `min`; callers that need a hard
    /// lower bound filter on the exact requirement instead.
    pub fn between(series: ESeries, min: f64, max: f64) -> EfResult<Self> {
        let min = ensure_positive(min, "minimum value")?;
        let max = ensure_positive(max, "maximum value")?;
        if min > max {
            return Err(EfError::InvalidArg {
                what: "minimum value must not exceed maximum value",
            });
        }

        let mut values = Vec::new();
        let mut current = approximate(min, series)?;
        while current.value() <= max {
            values.push(current);
            current = current.next_up();
        }
        Ok(Self { series, values })
    }

    pub fn series(&self) -> ESeries {
        self.series
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandardValue> + Clone {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[StandardValue] {
        &self.values
    }

    /// Plain numeric values, ascending.
    pub fn to_f64(&self) -> Vec<f64> {
        self.values.iter().map(StandardValue::value).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a StandardValues {
    type Item = &'a StandardValue;
    type IntoIter = std::slice::Iter<'a, StandardValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
