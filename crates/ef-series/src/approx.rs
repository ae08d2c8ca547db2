//! Approximating arbitrary values onto a series.

use crate::series::ESeries;
use crate::value::StandardValue;
use ef_core::{EfError, EfResult, ensure_positive, format_eng, relative_error};

/// Slack, in hundredths of a mantissa, for treating a value as already standard.
const SNAP: f64 = 1e-7;

/// Largest supported decade exponent, in either direction.
pub const MAX_EXPONENT: i32 = 30;

/// The standard value of `series` at or below `x`.
///
/// Values within a relative 1e-9 of a standard value map onto it, so
/// `approximate(4.7e-9, E12)` is exactly 4.7n even though the division
/// inside does not land on 4.7.
pub fn approximate(x: f64, series: ESeries) -> EfResult<StandardValue> {
    let x = ensure_positive(x, "approximated value")?;

    let mut exponent = x.log10().floor() as i32;
    if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
        return Err(EfError::OutOfRange {
            value: x,
            reason: "outside the supported decade range",
        });
    }

    let shift = exponent - 2;
    let mut scaled = if shift >= 0 {
        x / 10f64.powi(shift)
    } else {
        x * 10f64.powi(-shift)
    };
    if scaled >= 1000.0 - SNAP {
        exponent += 1;
        scaled /= 10.0;
    } else if scaled < 100.0 - SNAP {
        exponent -= 1;
        scaled *= 10.0;
    }

    let index = series
        .hundredths()
        .iter()
        .rposition(|&h| f64::from(h) <= scaled + SNAP)
        .unwrap_or(0);

    Ok(StandardValue {
        series,
        index,
        exponent,
    })
}

/// An exact (ideal) value paired with the standard value chosen for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approximation {
    pub exact: f64,
    pub standard: StandardValue,
}

impl Approximation {
    /// Floor approximation of `exact`.
    pub fn new(exact: f64, series: ESeries) -> EfResult<Self> {
        Ok(Self {
            exact,
            standard: approximate(exact, series)?,
        })
    }

    /// A standard value taken as its own ideal.
    pub fn exact_standard(standard: StandardValue) -> Self {
        Self {
            exact: standard.value(),
            standard,
        }
    }

    pub fn with_exact(standard: StandardValue, exact: f64) -> Self {
        Self { exact, standard }
    }

    pub fn approx(&self) -> f64 {
        self.standard.value()
    }

    /// Relative error of the standard value against the ideal.
    pub fn error(&self) -> f64 {
        relative_error(self.approx(), self.exact)
    }

    /// The next standard value up, if this one falls short of the ideal.
    pub fn above(&self) -> Option<Self> {
        (self.approx() < self.exact).then(|| Self {
            exact: self.exact,
            standard: self.standard.next_up(),
        })
    }

    /// Floor or ceiling, whichever is closer in relative terms.
    pub fn best(self) -> Self {
        match self.above() {
            Some(other) if other.error().powi(2) < self.error().powi(2) => other,
            _ => self,
        }
    }

    pub fn format(&self, unit: &str) -> EfResult<String> {
        self.standard.format(unit)
    }

    pub fn format_exact(&self, unit: &str) -> EfResult<String> {
        format_eng(self.exact, unit, 4)
    }
}
