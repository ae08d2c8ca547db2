//! Multi-component design solver.
//!
//! Components are visited in order. A free component walks every standard
//! value between its bounds; a derived component computes its ideal value from
//! the components before it and tries the standard values on either side.
//! Each complete assignment is scored against the expected outputs and kept
//! when the score is under the threshold.

use crate::error::{SolverError, SolverResult};
use ef_core::{Tolerances, format_eng, nearly_equal};
use ef_core::units::symbols;
use ef_series::{Approximation, ESeries, StandardValues};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Formula over the values of earlier components (or all components, for outputs).
pub type Formula = Box<dyn Fn(&[f64]) -> f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
}

impl ComponentKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ComponentKind::Resistor => "R",
            ComponentKind::Capacitor => "C",
            ComponentKind::Inductor => "L",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ComponentKind::Resistor => symbols::OHM,
            ComponentKind::Capacitor => symbols::FARAD,
            ComponentKind::Inductor => symbols::HENRY,
        }
    }

    /// Whether a part's own rounding error is scored unless overridden.
    fn default_use_for_error(self) -> bool {
        !matches!(self, ComponentKind::Resistor)
    }
}

enum Role {
    Free,
    Derived(Formula),
}

/// One part in the design chain.
pub struct Component {
    pub kind: ComponentKind,
    pub suffix: String,
    pub series: ESeries,
    pub min: f64,
    pub max: Option<f64>,
    pub use_for_error: bool,
    role: Role,
}

impl Component {
    pub fn new(kind: ComponentKind, suffix: impl Into<String>) -> Self {
        Self {
            kind,
            suffix: suffix.into(),
            series: ESeries::E24,
            min: 0.0,
            max: None,
            use_for_error: kind.default_use_for_error(),
            role: Role::Free,
        }
    }

    pub fn resistor(suffix: impl Into<String>) -> Self {
        Self::new(ComponentKind::Resistor, suffix)
    }

    pub fn capacitor(suffix: impl Into<String>) -> Self {
        Self::new(ComponentKind::Capacitor, suffix)
    }

    pub fn inductor(suffix: impl Into<String>) -> Self {
        Self::new(ComponentKind::Inductor, suffix)
    }

    pub fn series(mut self, series: ESeries) -> Self {
        self.series = series;
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = Some(max);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn use_for_error(mut self, use_for_error: bool) -> Self {
        self.use_for_error = use_for_error;
        self
    }

    /// Compute this component's ideal value from the components before it.
    pub fn derived(mut self, formula: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        self.role = Role::Derived(Box::new(formula));
        self
    }

    pub fn is_free(&self) -> bool {
        matches!(self.role, Role::Free)
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.suffix)
    }

    fn validate(&self) -> SolverResult<()> {
        let setup = |what: &str| SolverError::ProblemSetup {
            what: format!("{}: {what}", self.name()),
        };

        if !self.min.is_finite() || self.min < 0.0 {
            return Err(setup("minimum must be finite and not negative"));
        }
        if let Some(max) = self.max {
            if !max.is_finite() || max < self.min {
                return Err(setup("maximum must be finite and not below the minimum"));
            }
        }
        if self.is_free() {
            if self.min <= 0.0 {
                return Err(setup("a free component needs a minimum above zero"));
            }
            if self.max.is_none() {
                return Err(setup("a free component needs a maximum"));
            }
        }
        Ok(())
    }

    fn within_bounds(&self, exact: f64) -> bool {
        self.min <= exact && self.max.is_none_or(|max| exact <= max)
    }

    fn free_values(&self) -> SolverResult<Vec<Approximation>> {
        let max = self.max.ok_or_else(|| SolverError::ProblemSetup {
            what: format!("{}: a free component needs a maximum", self.name()),
        })?;
        let values = StandardValues::between(self.series, self.min, max)?;
        Ok(values
            .iter()
            .map(|v| Approximation::exact_standard(*v))
            .collect())
    }

    /// Floor and ceiling around the ideal computed from exact inputs, then the
    /// same around the ideal computed from the already-rounded inputs.
    fn derived_values(&self, formula: &Formula, previous: &[Approximation]) -> Vec<Approximation> {
        let exact_inputs: Vec<f64> = previous.iter().map(|v| v.exact).collect();
        let approx_inputs: Vec<f64> = previous.iter().map(Approximation::approx).collect();

        let mut out = Vec::with_capacity(4);
        let from_exact = formula(&exact_inputs);
        if !(from_exact.is_finite() && from_exact > 0.0) {
            return out;
        }
        self.push_neighbours(from_exact, &mut out);

        let from_approx = formula(&approx_inputs);
        if from_approx.is_finite()
            && from_approx > 0.0
            && !nearly_equal(from_approx, from_exact, Tolerances::default())
        {
            self.push_neighbours(from_approx, &mut out);
        }

        out.retain(|v| self.within_bounds(v.exact));
        out
    }

    fn push_neighbours(&self, ideal: f64, out: &mut Vec<Approximation>) {
        match Approximation::new(ideal, self.series) {
            Ok(floor) => {
                out.push(floor);
                out.extend(floor.above());
            }
            Err(err) => debug!(component = %self.name(), ideal, %err, "ideal value not representable"),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name())
            .field("series", &self.series)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("use_for_error", &self.use_for_error)
            .field("free", &self.is_free())
            .finish()
    }
}

/// A computed circuit quantity with the value it should ideally take.
pub struct Output {
    pub name: String,
    pub unit: String,
    pub expected: f64,
    calculate: Formula,
}

impl Output {
    /// `calculate` receives one value per component, in component order.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        expected: f64,
        calculate: impl Fn(&[f64]) -> f64 + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            expected,
            calculate: Box::new(calculate),
        }
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        (self.calculate)(values)
    }

    /// Absolute error; the expected value may be zero.
    pub fn error(&self, value: f64) -> f64 {
        value - self.expected
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .field("expected", &self.expected)
            .finish()
    }
}

/// One accepted assignment of standard values.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Sum of squared output errors plus squared relative component errors.
    pub error: f64,
    pub outputs: Vec<f64>,
    pub values: Vec<Approximation>,
}

impl Solution {
    pub fn approx_values(&self) -> Vec<f64> {
        self.values.iter().map(Approximation::approx).collect()
    }
}

#[derive(Default)]
struct SolveState {
    seen: HashSet<Vec<u64>>,
    solutions: Vec<Solution>,
    evaluated: usize,
}

/// Brute-force search through chained component values.
#[derive(Debug)]
pub struct DesignSolver {
    components: Vec<Component>,
    outputs: Vec<Output>,
    threshold: Option<f64>,
}

impl DesignSolver {
    pub const DEFAULT_THRESHOLD: f64 = 1e-3;

    pub fn new(components: Vec<Component>, outputs: Vec<Output>) -> Self {
        Self {
            components,
            outputs,
            threshold: Some(Self::DEFAULT_THRESHOLD),
        }
    }

    /// Discard solutions whose error is not below `threshold`; `None` keeps all.
    pub fn threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.components.is_empty() {
            return Err(SolverError::ProblemSetup {
                what: "no components to solve for".to_string(),
            });
        }
        for component in &self.components {
            component.validate()?;
        }
        for output in &self.outputs {
            if !output.expected.is_finite() {
                return Err(SolverError::ProblemSetup {
                    what: format!("{}: expected value must be finite", output.name),
                });
            }
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(SolverError::InvalidTolerance { value: threshold });
            }
        }
        Ok(())
    }

    /// Run the search. Solutions come back in order of increasing error.
    pub fn solve(&self) -> SolverResult<Vec<Solution>> {
        self.validate()?;

        let free = self
            .components
            .iter()
            .map(|c| c.is_free().then(|| c.free_values()).transpose())
            .collect::<SolverResult<Vec<_>>>()?;
        for (component, values) in self.components.iter().zip(&free) {
            if let Some(values) = values {
                debug!(component = %component.name(), count = values.len(), "free component values");
            }
        }

        let mut state = SolveState::default();
        let mut values = Vec::with_capacity(self.components.len());
        self.recurse(&free, &mut values, &mut state);

        let mut solutions = state.solutions;
        solutions.sort_by(|a, b| a.error.total_cmp(&b.error));

        info!(
            evaluated = state.evaluated,
            accepted = solutions.len(),
            "design search finished"
        );
        Ok(solutions)
    }

    fn recurse(
        &self,
        free: &[Option<Vec<Approximation>>],
        values: &mut Vec<Approximation>,
        state: &mut SolveState,
    ) {
        let index = values.len();
        let Some(component) = self.components.get(index) else {
            self.evaluate(values, state);
            return;
        };

        let candidates: Cow<'_, [Approximation]> = match (&free[index], &component.role) {
            (Some(list), _) => Cow::Borrowed(list.as_slice()),
            (None, Role::Derived(formula)) => Cow::Owned(component.derived_values(formula, values)),
            (None, Role::Free) => Cow::Owned(Vec::new()),
        };

        for candidate in candidates.iter() {
            values.push(*candidate);
            self.recurse(free, values, state);
            values.pop();
        }
    }

    fn evaluate(&self, values: &[Approximation], state: &mut SolveState) {
        let approx: Vec<f64> = values.iter().map(Approximation::approx).collect();
        let key: Vec<u64> = approx.iter().map(|v| v.to_bits()).collect();
        if state.seen.contains(&key) {
            return;
        }
        state.evaluated += 1;

        let outputs: Vec<f64> = self.outputs.iter().map(|o| o.evaluate(&approx)).collect();
        let output_error: f64 = self
            .outputs
            .iter()
            .zip(&outputs)
            .map(|(o, v)| o.error(*v).powi(2))
            .sum();
        let component_error: f64 = self
            .components
            .iter()
            .zip(values)
            .filter(|(c, _)| c.use_for_error)
            .map(|(_, v)| v.error().powi(2))
            .sum();
        let error = output_error + component_error;

        if !error.is_finite() {
            return;
        }
        if self.threshold.is_none_or(|t| error < t) {
            state.solutions.push(Solution {
                error,
                outputs,
                values: values.to_vec(),
            });
            state.seen.insert(key);
        }
    }

    /// Text table of the best `top` solutions: component values, then each
    /// output with its absolute error.
    pub fn render_table(&self, solutions: &[Solution], top: usize) -> SolverResult<String> {
        let widths: Vec<usize> = self
            .components
            .iter()
            .map(|c| 4 + c.series.significant_digits())
            .collect();

        let mut header: Vec<String> = self
            .components
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c.name(), w = *w))
            .collect();
        header.extend(
            self.outputs
                .iter()
                .map(|o| format!("{:>10} {:>8}", o.name, "Err")),
        );

        let mut lines = vec![header.join(" ")];
        for solution in solutions.iter().take(top) {
            let mut row = Vec::with_capacity(self.components.len() + self.outputs.len());
            for ((component, value), w) in self.components.iter().zip(&solution.values).zip(&widths) {
                row.push(format!("{:>w$}", value.format(component.kind.unit())?, w = *w));
            }
            for (output, value) in self.outputs.iter().zip(&solution.outputs) {
                row.push(format!(
                    "{:>10} {:>8.1e}",
                    format_eng(*value, &output.unit, 4)?,
                    output.error(*value)
                ));
            }
            lines.push(row.join(" "));
        }
        Ok(lines.join("\n"))
    }
}
