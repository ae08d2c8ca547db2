//! ef-core: shared foundation for efind.
//!
//! Contains:
//! - units (uom SI types for passive components + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - eng (engineering notation formatting and parsing)
//! - error (shared error types)

pub mod eng;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use eng::{format_eng, parse_eng};
pub use error::{EfError, EfResult};
pub use numeric::*;
pub use units::*;
