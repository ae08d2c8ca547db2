//! ef-series: E-series preferred numbers for passive components.
//!
//! Provides:
//! - The IEC 60063 tables E3 through E96
//! - Decade ranges and enumeration of every standard value inside one
//! - Approximation of an arbitrary value onto a series (floor, ceiling, best)
//!
//! # Example
//!
//! ```
//! use ef_series::{approximate, Approximation, ESeries};
//!
//! let floor = approximate(4_900.0, ESeries::E24).unwrap();
//! assert_eq!(floor.value(), 4_700.0);
//!
//! let best = Approximation::new(5_000.0, ESeries::E24).unwrap().best();
//! assert_eq!(best.approx(), 5_100.0);
//! ```

pub mod approx;
pub mod decade;
pub mod series;
pub mod value;

pub use approx::{Approximation, MAX_EXPONENT, approximate};
pub use decade::{DecadeRange, StandardValues};
pub use series::ESeries;
pub use value::StandardValue;
