//! Error types for search and design operations.

use ef_core::EfError;
use thiserror::Error;

/// Errors that can occur while setting up or running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid target {value}: must be finite and greater than zero")]
    InvalidTarget { value: f64 },

    #[error("Invalid tolerance {value}: must be finite and not negative")]
    InvalidTolerance { value: f64 },

    #[error("Invalid arity {arity}: at least one component is required")]
    InvalidArity { arity: usize },

    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("No combination within {tolerance} of {target}")]
    NoCandidates { target: f64, tolerance: String },

    #[error("Core error: {0}")]
    Core(#[from] EfError),
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SolverError::InvalidTarget { value: -1.0 };
        assert!(err.to_string().contains("-1"));

        let err = SolverError::NoCandidates {
            target: 1000.0,
            tolerance: "±1%".into(),
        };
        assert!(err.to_string().contains("±1%"));
    }

    #[test]
    fn core_error_converts() {
        let core = EfError::InvalidArg { what: "decades" };
        let err: SolverError = core.into();
        assert!(matches!(err, SolverError::Core(_)));
    }
}
