//! Exhaustive search over tuples of standard values.

use crate::error::{SolverError, SolverResult};
use ef_core::{format_eng, relative_error};
use ef_series::StandardValues;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

/// Most tuples a front end should let one search evaluate.
pub const MAX_COMBINATIONS: u128 = 20_000_000;

/// Allowed deviation of a combined result from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Error is `|achieved / target - 1|`.
    Relative(f64),
    /// Error is `|achieved - target|`.
    Absolute(f64),
}

impl Tolerance {
    pub fn limit(&self) -> f64 {
        match *self {
            Tolerance::Relative(limit) | Tolerance::Absolute(limit) => limit,
        }
    }

    pub fn error(&self, achieved: f64, target: f64) -> f64 {
        match self {
            Tolerance::Relative(_) => relative_error(achieved, target).abs(),
            Tolerance::Absolute(_) => (achieved - target).abs(),
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        let limit = self.limit();
        if !limit.is_finite() || limit < 0.0 {
            return Err(SolverError::InvalidTolerance { value: limit });
        }
        Ok(())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Relative(0.01)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Relative(r) => write!(f, "±{}%", r * 100.0),
            Tolerance::Absolute(a) => write!(f, "±{a}"),
        }
    }
}

/// Target, tolerance and the pool of values to combine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub target: f64,
    pub tolerance: Tolerance,
    /// Number of values per combination (the maximum, with `allow_fewer`).
    pub arity: usize,
    /// Candidate values, ascending and free of duplicates.
    pub values: Vec<f64>,
    /// Formula ignores order: only non-decreasing tuples are tried.
    pub symmetric: bool,
    /// Also try every arity from 1 up to `arity`.
    pub allow_fewer: bool,
    /// Keep only the best N results.
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(target: f64, tolerance: Tolerance, arity: usize, values: &StandardValues) -> Self {
        Self::from_values(target, tolerance, arity, values.to_f64())
    }

    /// Search over an arbitrary pool, e.g. the values actually in stock.
    pub fn from_values(target: f64, tolerance: Tolerance, arity: usize, mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        values.dedup();
        Self {
            target,
            tolerance,
            arity,
            values,
            symmetric: false,
            allow_fewer: false,
            limit: None,
        }
    }

    pub fn symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    pub fn allow_fewer(mut self, allow_fewer: bool) -> Self {
        self.allow_fewer = allow_fewer;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(SolverError::InvalidTarget { value: self.target });
        }
        self.tolerance.validate()?;
        if self.arity == 0 {
            return Err(SolverError::InvalidArity { arity: self.arity });
        }
        if self.values.is_empty() {
            return Err(SolverError::ProblemSetup {
                what: "no standard values to combine".to_string(),
            });
        }
        if let Some(bad) = self.values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("component value {bad} is not a positive finite number"),
            });
        }
        Ok(())
    }

    pub fn arities(&self) -> RangeInclusive<usize> {
        if self.allow_fewer { 1..=self.arity } else { self.arity..=self.arity }
    }

    /// Number of tuples the search will evaluate.
    pub fn combinations(&self) -> u128 {
        let n = self.values.len() as u128;
        self.arities()
            .map(|k| {
                let k = k as u128;
                if self.symmetric {
                    // multiset coefficient C(n + k - 1, k)
                    (0..k).fold(1u128, |acc, i| acc.saturating_mul(n + i) / (i + 1))
                } else {
                    (0..k).fold(1u128, |acc, _| acc.saturating_mul(n))
                }
            })
            .fold(0u128, u128::saturating_add)
    }

    /// Reject requests that would evaluate more than `budget` tuples.
    pub fn check_budget(&self, budget: u128) -> SolverResult<()> {
        let combinations = self.combinations();
        if combinations > budget {
            return Err(SolverError::ProblemSetup {
                what: format!("{combinations} combinations exceed the budget of {budget}"),
            });
        }
        Ok(())
    }
}

/// One combination of standard values and how close it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub values: Vec<f64>,
    pub achieved: f64,
    pub error: f64,
}

impl Candidate {
    /// Error first, then fewer parts, then smaller values.
    pub fn rank(a: &Candidate, b: &Candidate) -> Ordering {
        a.error
            .total_cmp(&b.error)
            .then(a.values.len().cmp(&b.values.len()))
            .then_with(|| {
                a.values
                    .iter()
                    .zip(&b.values)
                    .map(|(x, y)| x.total_cmp(y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Values in engineering notation joined with `sep`.
    pub fn format_values(&self, unit: &str, sig: usize, sep: &str) -> ef_core::EfResult<String> {
        let parts = self
            .values
            .iter()
            .map(|v| format_eng(*v, unit, sig))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(sep))
    }
}

/// Heap entry ordered by [`Candidate::rank`], worst on top.
struct Ranked(Candidate);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        Candidate::rank(&self.0, &other.0)
    }
}

/// Enumerate every tuple in `request` and keep those within tolerance.
///
/// Results are sorted by [`Candidate::rank`]. An empty vector means nothing
/// landed inside the tolerance. Tuples for which `combine` returns a
/// non-finite number are skipped. With a `limit`, only that many candidates
/// are held at any time.
pub fn search<F>(request: &SearchRequest, combine: F) -> SolverResult<Vec<Candidate>>
where
    F: Fn(&[f64]) -> f64,
{
    request.validate()?;

    debug!(
        goal = request.target,
        arity = request.arity,
        pool = request.values.len(),
        combinations = %request.combinations(),
        "enumerating combinations"
    );

    let limit = request.tolerance.limit();
    let mut kept = BinaryHeap::new();
    let mut skipped = 0usize;

    for arity in request.arities() {
        let tuples: Box<dyn Iterator<Item = Vec<f64>> + '_> = if request.symmetric {
            Box::new(request.values.iter().copied().combinations_with_replacement(arity))
        } else {
            Box::new(
                (0..arity)
                    .map(|_| request.values.iter().copied())
                    .multi_cartesian_product(),
            )
        };

        for values in tuples {
            let achieved = combine(&values);
            if !achieved.is_finite() {
                skipped += 1;
                continue;
            }
            let error = request.tolerance.error(achieved, request.target);
            if error <= limit {
                kept.push(Ranked(Candidate {
                    values,
                    achieved,
                    error,
                }));
                if request.limit.is_some_and(|n| kept.len() > n) {
                    kept.pop();
                }
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "combination formula returned non-finite results");
    }

    let candidates: Vec<Candidate> = kept.into_sorted_vec().into_iter().map(|r| r.0).collect();

    info!(
        goal = request.target,
        found = candidates.len(),
        "search finished"
    );
    Ok(candidates)
}

/// Like [`search`], but an empty result is an error.
pub fn search_best<F>(request: &SearchRequest, combine: F) -> SolverResult<Candidate>
where
    F: Fn(&[f64]) -> f64,
{
    search(request, combine)?
        .into_iter()
        .next()
        .ok_or_else(|| SolverError::NoCandidates {
            target: request.target,
            tolerance: request.tolerance.to_string(),
        })
}
