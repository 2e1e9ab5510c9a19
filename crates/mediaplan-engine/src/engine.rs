//! Budget orchestration for one row.
//!
//! Composes the leaf calculators into the single computational entry point.
//! Media mode is a direct pass: the entered amount is the media budget and
//! the client budget follows by adding fees. Client mode fixes the client
//! budget and back-solves the media budget, because fees are themselves a
//! function of the media budget.

use mediaplan_types::{BudgetInput, BudgetMode, BudgetResult, FeeDefinition};
use tracing::{debug, instrument, warn};

use crate::calc::bonus::bonus_value;
use crate::calc::fees::{FeeBreakdown, evaluate_cascade};
use crate::calc::volume::unit_volume;
use crate::solver::{SolverConfig, solve_for_target};

/// The budget calculation engine.
///
/// Holds solver configuration only. Every call recomputes from its explicit
/// inputs, so repeated invocation with the same row and catalogue is
/// idempotent.
#[derive(Debug, Clone, Default)]
pub struct BudgetEngine {
    solver: SolverConfig,
}

/// One full bonus -> volume -> fees computation at a media-budget estimate.
struct RowPass {
    bonus: f64,
    unit_volume: i64,
    fees: FeeBreakdown,
}

fn run_pass(input: &BudgetInput, fee_defs: &[FeeDefinition], media_budget: f64) -> RowPass {
    let bonus = bonus_value(input.mode, input.amount, input.real_value, media_budget);
    // Volume precedes fees: per-unit fee types consume it.
    let unit_volume = unit_volume(media_budget + bonus, input.unit_price, &input.unit_type);
    let fees = evaluate_cascade(input, fee_defs, media_budget, unit_volume);
    RowPass { bonus, unit_volume, fees }
}

fn assemble(
    media_budget: f64,
    pass: RowPass,
    converged: bool,
    iterations: Option<u32>,
) -> BudgetResult {
    BudgetResult {
        media_budget,
        client_budget: media_budget + pass.fees.total,
        total_fees: pass.fees.total,
        unit_volume: pass.unit_volume,
        bonus: pass.bonus,
        fee_amounts: pass.fees.amounts,
        converged,
        iterations,
    }
}

impl BudgetEngine {
    /// Engine with the default solver configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom solver configuration.
    #[must_use]
    pub fn with_solver(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Derive every computed quantity of one row.
    ///
    /// A non-positive budget amount or unit price short-circuits to the
    /// zeroed "nothing to compute yet" result; that state is not an error.
    #[instrument(skip(self, input, fee_defs), fields(mode = %input.mode, amount = input.amount))]
    pub fn calculate_budget_for_row(
        &self,
        input: &BudgetInput,
        fee_defs: &[FeeDefinition],
    ) -> BudgetResult {
        if input.amount <= 0.0 || input.unit_price <= 0.0 {
            debug!("nothing to compute yet, returning zeroed result");
            return BudgetResult::zeroed();
        }

        match input.mode {
            BudgetMode::Media => {
                let media_budget = input.amount;
                let pass = run_pass(input, fee_defs, media_budget);
                debug!(total_fees = pass.fees.total, "media-mode pass complete");
                assemble(media_budget, pass, true, None)
            }
            BudgetMode::Client => {
                let target = input.amount;
                let outcome = solve_for_target(
                    |media_budget| {
                        media_budget + run_pass(input, fee_defs, media_budget).fees.total
                    },
                    target,
                    &self.solver,
                );
                if !outcome.converged {
                    warn!(
                        target,
                        iterations = outcome.iterations,
                        "client budget solve did not converge, returning best estimate"
                    );
                }
                // One final full pass with the last estimate produces the
                // returned bonus, volume, and fee breakdown.
                let pass = run_pass(input, fee_defs, outcome.value);
                assemble(outcome.value, pass, outcome.converged, Some(outcome.iterations))
            }
        }
    }
}

/// Calculate one row with the default solver configuration.
#[must_use]
pub fn calculate_budget_for_row(
    input: &BudgetInput,
    fee_defs: &[FeeDefinition],
) -> BudgetResult {
    BudgetEngine::new().calculate_budget_for_row(input, fee_defs)
}
