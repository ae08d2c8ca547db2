//! Exhaustive search for standard component combinations.
//!
//! Two entry points:
//! - [`search`]: one target value, one formula, every tuple of standard
//!   values up to a given arity. Results inside the tolerance come back
//!   ordered by increasing error.
//! - [`DesignSolver`]: an ordered chain of components where later values may
//!   be derived from earlier ones, ranked by how well a set of circuit outputs
//!   hit their expected values.
//!
//! Neither does any pruning; the series tables are small enough that brute
//! force is the simplest correct answer.

pub mod design;
pub mod error;
pub mod formulas;
pub mod search;
pub mod topology;

pub use design::{Component, ComponentKind, DesignSolver, Output, Solution};
pub use error::{SolverError, SolverResult};
pub use search::{Candidate, MAX_COMBINATIONS, SearchRequest, Tolerance, search, search_best};
pub use topology::Topology;
