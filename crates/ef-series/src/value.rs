//! A single standard value: series mantissa times a power of ten.

use crate::series::ESeries;
use ef_core::{EfResult, format_eng};
use std::fmt;

/// `series.mantissa(index) * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardValue {
    pub series: ESeries,
    pub index: usize,
    pub exponent: i32,
}

impl StandardValue {
    pub fn new(series: ESeries, index: usize, exponent: i32) -> Option<Self> {
        (index < series.len()).then_some(Self {
            series,
            index,
            exponent,
        })
    }

    pub fn value(&self) -> f64 {
        scale_hundredths(self.series.hundredths()[self.index], self.exponent)
    }

    /// Next larger value, carrying into the next decade.
    pub fn next_up(&self) -> Self {
        if self.index + 1 < self.series.len() {
            Self {
                index: self.index + 1,
                ..*self
            }
        } else {
            Self {
                index: 0,
                exponent: self.exponent + 1,
                ..*self
            }
        }
    }

    /// Next smaller value, borrowing from the previous decade.
    pub fn next_down(&self) -> Self {
        if self.index > 0 {
            Self {
                index: self.index - 1,
                ..*self
            }
        } else {
            Self {
                index: self.series.len() - 1,
                exponent: self.exponent - 1,
                ..*self
            }
        }
    }

    /// Engineering notation with as many digits as the series needs.
    pub fn format(&self, unit: &str) -> EfResult<String> {
        format_eng(self.value(), unit, self.series.significant_digits())
    }
}

impl fmt::Display for StandardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// `hundredths / 100 * 10^exponent` with a single rounding step.
pub(crate) fn scale_hundredths(hundredths: u16, exponent: i32) -> f64 {
    let h = f64::from(hundredths);
    let shift = exponent - 2;
    if shift >= 0 {
        h * 10f64.powi(shift)
    } else {
        h / 10f64.powi(-shift)
    }
}
