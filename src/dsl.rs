//! Thin declarative problem façade.
//!
//! Callers describe a dynamic program — state variables, sequences,
//! conditions, objective — and the façade pattern-matches the descriptor
//! against the fixed signatures of the supported problems, then dispatches
//! to the matching solver entry point. The core solvers never see the
//! descriptor; the façade only forwards plain arguments.
//!
//! ```
//! use cordon_dp::dsl::{Condition, ExprKind, Problem, ProblemKind, StateVar};
//!
//! let problem = Problem::builder()
//!     .state_var(StateVar::Independent { lo: 0, hi: 10 })
//!     .state_var(StateVar::RangeDependent)
//!     .sequence(vec![3, 1, 4, 2, 7, 5, 8, 6, 9, 10])
//!     .condition(Condition::unconditional(ExprKind::Max))
//!     .build();
//!
//! assert_eq!(problem.kind().unwrap(), ProblemKind::Lis);
//! ```

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::solvers::glws::solve_convex_glws;
use crate::solvers::lcs::solve_lcs;
use crate::solvers::lis::solve_lis;
use crate::utils::DEFAULT_GRANULARITY;

/// Optimisation direction of the described recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

/// Kinds of state variables a descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateVar {
    /// Free index ranging over `lo..=hi`.
    Independent { lo: i64, hi: i64 },
    /// Index pinned to another variable plus a constant offset.
    SingleDependent { offset: i64 },
    /// Index ranging over all states before another variable.
    RangeDependent,
}

/// Relation between two sequence elements inside a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

/// Shape of the expression a condition contributes to the recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Max,
    Min,
    Number,
    Status,
}

/// One guarded term of the recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Guard relating two sequence elements; `None` means unconditional.
    pub relation: Option<Relation>,
    /// Expression applied when the guard holds.
    pub expr: ExprKind,
}

impl Condition {
    /// A condition that always applies.
    pub fn unconditional(expr: ExprKind) -> Self {
        Self {
            relation: None,
            expr,
        }
    }

    /// A condition guarded by a relation between sequence elements.
    pub fn related(relation: Relation, expr: ExprKind) -> Self {
        Self {
            relation: Some(relation),
            expr,
        }
    }
}

/// Problem classes the recogniser can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Lis,
    Lcs,
    ConvexGlws,
}

/// Result of a dispatched solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    /// Subsequence length (LIS / LCS).
    Length(usize),
    /// Minimum total cost (convex GLWS).
    Cost(f64),
}

/// A declarative problem descriptor.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    state_vars: Vec<StateVar>,
    conditions: Vec<Condition>,
    sequences: Vec<Vec<i64>>,
    positions: Option<Vec<f64>>,
    values: HashMap<String, f64>,
    objective: Objective,
}

impl Problem {
    /// Start building a descriptor.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder {
            problem: Problem::default(),
        }
    }

    /// Match the descriptor against the known problem signatures.
    pub fn kind(&self) -> Result<ProblemKind> {
        let independents = self
            .state_vars
            .iter()
            .filter(|v| matches!(v, StateVar::Independent { .. }))
            .count();
        let range_deps = self
            .state_vars
            .iter()
            .filter(|v| matches!(v, StateVar::RangeDependent))
            .count();

        let lis_shape = independents == 1
            && range_deps == 1
            && self.sequences.len() == 1
            && self.objective == Objective::Maximize
            && self
                .conditions
                .iter()
                .any(|c| c.relation.is_none() && c.expr == ExprKind::Max);
        if lis_shape {
            return Ok(ProblemKind::Lis);
        }

        let lcs_shape = independents == 2
            && self.sequences.len() == 2
            && self.objective == Objective::Maximize
            && self
                .conditions
                .first()
                .is_some_and(|c| c.relation == Some(Relation::Equal) && c.expr == ExprKind::Status);
        if lcs_shape {
            return Ok(ProblemKind::Lcs);
        }

        let glws_shape = independents == 1
            && self.objective == Objective::Minimize
            && self.positions.is_some()
            && self.values.contains_key("build_cost");
        if glws_shape {
            return Ok(ProblemKind::ConvexGlws);
        }

        Err(Error::UnknownProblem)
    }

    /// Recognise the problem and run the matching solver with default
    /// parallel settings.
    pub fn solve(&self) -> Result<Solution> {
        match self.kind()? {
            ProblemKind::Lis => {
                let seq = self.sequences.first().ok_or(Error::UnknownProblem)?;
                Ok(Solution::Length(solve_lis(seq, true, DEFAULT_GRANULARITY)))
            }
            ProblemKind::Lcs => {
                let [a, b] = &self.sequences[..] else {
                    return Err(Error::UnknownProblem);
                };
                Ok(Solution::Length(solve_lcs(a, b, true, DEFAULT_GRANULARITY)))
            }
            ProblemKind::ConvexGlws => {
                let positions = self.positions.as_ref().ok_or(Error::UnknownProblem)?;
                let build = *self
                    .values
                    .get("build_cost")
                    .ok_or(Error::UnknownProblem)?;
                let cost = move |j: usize, i: usize, p: &[f64]| median_segment_cost(j, i, p, build);
                Ok(Solution::Cost(solve_convex_glws(
                    positions,
                    cost,
                    true,
                    DEFAULT_GRANULARITY,
                )))
            }
        }
    }
}

/// Cost of serving positions `p[j..i]` from one facility at their median,
/// plus a fixed build cost. Convex Monge over sorted positions.
fn median_segment_cost(j: usize, i: usize, p: &[f64], build: f64) -> f64 {
    if i <= j {
        return build;
    }
    let median = p[j + (i - j - 1) / 2];
    p[j..i].iter().map(|x| (x - median).abs()).sum::<f64>() + build
}

/// Chainable builder for [`Problem`] descriptors.
pub struct ProblemBuilder {
    problem: Problem,
}

impl ProblemBuilder {
    /// Declare a state variable.
    pub fn state_var(mut self, var: StateVar) -> Self {
        self.problem.state_vars.push(var);
        self
    }

    /// Add an integer input sequence.
    pub fn sequence(mut self, seq: Vec<i64>) -> Self {
        self.problem.sequences.push(seq);
        self
    }

    /// Attach the position array a weighted-subsequence cost works over.
    pub fn positions(mut self, positions: Vec<f64>) -> Self {
        self.problem.positions = Some(positions);
        self
    }

    /// Attach a named scalar, e.g. `build_cost`.
    pub fn value(mut self, name: &str, value: f64) -> Self {
        self.problem.values.insert(name.to_string(), value);
        self
    }

    /// Add a recurrence condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.problem.conditions.push(condition);
        self
    }

    /// Set the optimisation direction (defaults to maximise).
    pub fn objective(mut self, objective: Objective) -> Self {
        self.problem.objective = objective;
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> Problem {
        self.problem
    }
}
