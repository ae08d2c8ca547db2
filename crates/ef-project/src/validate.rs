//! Search definition validation.

use crate::schema::{LATEST_VERSION, SearchDef, SearchProject};
use ef_series::StandardValues;
use ef_solver::{MAX_COMBINATIONS, SearchRequest};
use std::collections::HashSet;

/// Largest arity a project file may ask for. Larger searches must also fit
/// within [`MAX_COMBINATIONS`].
pub const MAX_ARITY: usize = 4;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &SearchProject) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut ids = HashSet::new();
    for search in &project.searches {
        if !ids.insert(&search.id) {
            return Err(ValidationError::DuplicateId {
                id: search.id.clone(),
                context: "searches".to_string(),
            });
        }
        validate_search(search)?;
    }

    Ok(())
}

pub fn validate_search(search: &SearchDef) -> Result<(), ValidationError> {
    let invalid = |field: &str, value: String, reason: &str| ValidationError::InvalidValue {
        field: format!("{}.{field}", search.id),
        value,
        reason: reason.to_string(),
    };

    if search.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "id".to_string(),
            value: format!("{:?}", search.id),
            reason: "must not be empty".to_string(),
        });
    }

    let target = search
        .target
        .resolve()
        .map_err(|e| invalid("target", format!("{:?}", search.target), &e.to_string()))?;
    if !target.is_finite() || target <= 0.0 {
        return Err(invalid("target", target.to_string(), "must be positive and finite"));
    }

    let tolerance = search.tolerance.value();
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(invalid(
            "tolerance",
            tolerance.to_string(),
            "must be finite and non-negative",
        ));
    }

    if search.arity == 0 || search.arity > MAX_ARITY {
        return Err(invalid(
            "arity",
            search.arity.to_string(),
            "must be between 1 and 4",
        ));
    }

    if let Err(e) = search.decades.validate() {
        return Err(invalid(
            "decades",
            format!("{}..={}", search.decades.min_exp, search.decades.max_exp),
            &e.to_string(),
        ));
    }

    if search.limit == Some(0) {
        return Err(invalid("limit", "0".to_string(), "must keep at least one result"));
    }

    let values = StandardValues::new(search.series, search.decades);
    let combinations = SearchRequest::new(target, search.tolerance.into(), search.arity, &values)
        .symmetric(search.topology.is_symmetric())
        .allow_fewer(search.allow_fewer)
        .combinations();
    if combinations > MAX_COMBINATIONS {
        return Err(invalid(
            "arity",
            search.arity.to_string(),
            &format!("{combinations} combinations exceed the budget of {MAX_COMBINATIONS}"),
        ));
    }

    Ok(())
}
