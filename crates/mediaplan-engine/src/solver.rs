//! Damped fixed-point solver.
//!
//! Finds `x` such that `f(x) ≈ target` by iterating
//! `x ← max(0, x - (f(x) - target) × damping)` from a seed of
//! `target × seed_factor`, stopping once the residual is within tolerance
//! or the iteration budget is spent.
//!
//! The budget engine instantiates this with `f(media) = media +
//! total_fees(media)` and the entered client budget as target, but nothing
//! here is specific to budgets. Failure is soft: exhausting the budget
//! returns the best estimate flagged as non-converged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::solver;

/// Tuning of the fixed-point loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Fraction of the target used as the initial estimate.
    pub seed_factor: f64,
    /// Fraction of the residual error fed back into the next estimate.
    pub damping: f64,
    /// Absolute residual under which the estimate counts as converged.
    pub tolerance: f64,
    /// Hard bound on iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed_factor: solver::SEED_FACTOR,
            damping: solver::DAMPING,
            tolerance: solver::TOLERANCE,
            max_iterations: solver::MAX_ITERATIONS,
        }
    }
}

/// Outcome of a fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// The estimate: within tolerance when `converged`, otherwise the best
    /// value reached before the budget ran out.
    pub value: f64,
    /// Whether the residual met the tolerance.
    pub converged: bool,
    /// Number of evaluations of `f` performed.
    pub iterations: u32,
}

/// Solve `f(x) ≈ target` with a damped fixed-point iteration.
///
/// The estimate is clamped at zero: the quantities this engine solves for
/// (budgets) are never negative.
pub fn solve_for_target(
    mut f: impl FnMut(f64) -> f64,
    target: f64,
    config: &SolverConfig,
) -> Convergence {
    let mut estimate = target * config.seed_factor;

    for iteration in 1..=config.max_iterations {
        let produced = f(estimate);
        let error = produced - target;
        debug!(iteration, estimate, error, "fixed-point step");

        if error.abs() <= config.tolerance {
            return Convergence { value: estimate, converged: true, iterations: iteration };
        }
        estimate = (estimate - error * config.damping).max(0.0);
    }

    debug!(
        estimate,
        max_iterations = config.max_iterations,
        "fixed-point solve exhausted its iteration budget"
    );
    Convergence { value: estimate, converged: false, iterations: config.max_iterations }
}
