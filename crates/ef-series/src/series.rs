//! E-series tables.
//!
//! Mantissas are stored as integer hundredths (`4.7` is `470`) so that scaled
//! values stay exact decimal numbers: `1.1` at exponent 2 is exactly `110.0`.

use ef_core::{EfError, EfResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const E3: [u16; 3] = [100, 220, 470];

const E6: [u16; 6] = [100, 150, 220, 330, 470, 680];

const E12: [u16; 12] = [100, 120, 150, 180, 220, 270, 330, 390, 470, 560, 680, 820];

const E24: [u16; 24] = [
    100, 110, 120, 130, 150, 160, 180, 200, 220, 240, 270, 300, //
    330, 360, 390, 430, 470, 510, 560, 620, 680, 750, 820, 910,
];

const E48: [u16; 48] = [
    100, 105, 110, 115, 121, 127, 133, 140, 147, 154, 162, 169, //
    178, 187, 196, 205, 215, 226, 237, 249, 261, 274, 287, 301, //
    316, 332, 348, 365, 383, 402, 422, 442, 464, 487, 511, 536, //
    562, 590, 619, 649, 681, 715, 750, 787, 825, 866, 909, 953,
];

const E96: [u16; 96] = [
    100, 102, 105, 107, 110, 113, 115, 118, 121, 124, 127, 130, //
    133, 137, 140, 143, 147, 150, 154, 158, 162, 165, 169, 174, //
    178, 182, 187, 191, 196, 200, 205, 210, 215, 221, 226, 232, //
    237, 243, 249, 255, 261, 267, 274, 280, 287, 294, 301, 309, //
    316, 324, 332, 340, 348, 357, 365, 374, 383, 392, 402, 412, //
    422, 432, 442, 453, 464, 475, 487, 499, 511, 523, 536, 549, //
    562, 576, 590, 604, 619, 634, 649, 665, 681, 698, 715, 732, //
    750, 768, 787, 806, 825, 845, 866, 887, 909, 931, 953, 976,
];

/// A series of preferred numbers, one decade's worth of mantissas.
///
/// Serialized as `E24`; deserialized with the same leniency as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ESeries {
    E3,
    E6,
    E12,
    E24,
    E48,
    E96,
}

impl ESeries {
    pub const ALL: [ESeries; 6] = [
        ESeries::E3,
        ESeries::E6,
        ESeries::E12,
        ESeries::E24,
        ESeries::E48,
        ESeries::E96,
    ];

    /// Mantissas in hundredths, ascending, starting at `100` (1.0).
    pub fn hundredths(self) -> &'static [u16] {
        match self {
            ESeries::E3 => &E3,
            ESeries::E6 => &E6,
            ESeries::E12 => &E12,
            ESeries::E24 => &E24,
            ESeries::E48 => &E48,
            ESeries::E96 => &E96,
        }
    }

    /// Mantissa at `index` in `[1, 10)`.
    pub fn mantissa(self, index: usize) -> f64 {
        f64::from(self.hundredths()[index]) / 100.0
    }

    pub fn mantissas(self) -> impl Iterator<Item = f64> {
        self.hundredths().iter().map(|&h| f64::from(h) / 100.0)
    }

    /// Number of values per decade.
    pub fn len(self) -> usize {
        self.hundredths().len()
    }

    pub fn is_empty(self) -> bool {
        false
    }

    /// Digits needed to print a value of this series without losing precision.
    pub fn significant_digits(self) -> usize {
        if self.len() > 24 { 3 } else { 2 }
    }

    /// Nominal manufacturing tolerance the series is designed for, in percent.
    pub fn tolerance_percent(self) -> f64 {
        match self {
            ESeries::E3 => 40.0,
            ESeries::E6 => 20.0,
            ESeries::E12 => 10.0,
            ESeries::E24 => 5.0,
            ESeries::E48 => 2.0,
            ESeries::E96 => 1.0,
        }
    }
}

impl fmt::Display for ESeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.len())
    }
}

impl FromStr for ESeries {
    type Err = EfError;

    /// Accepts `E24`, `e24` or `24`.
    fn from_str(s: &str) -> EfResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(['E', 'e'])
            .unwrap_or(trimmed);
        ESeries::ALL
            .into_iter()
            .find(|series| digits.parse::<usize>().ok() == Some(series.len()))
            .ok_or_else(|| EfError::Parse {
                input: s.to_string(),
                what: "an E-series name (E3, E6, E12, E24, E48, E96)",
            })
    }
}

impl TryFrom<String> for ESeries {
    type Error = EfError;

    fn try_from(s: String) -> EfResult<Self> {
        s.parse()
    }
}
