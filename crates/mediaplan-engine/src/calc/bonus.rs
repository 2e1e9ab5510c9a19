//! Bonus (bonification) calculator.
//!
//! Derives the value of free inventory from a user-declared real value
//! versus the paid media budget. A real value at or below what was paid
//! yields zero; the bonus is never negative.

use mediaplan_types::BudgetMode;

/// Value of inventory received beyond what was paid for.
///
/// In media mode the declared real value is compared against the entered
/// amount. In client mode the media budget is itself being solved for, so
/// the comparison uses the current media-budget estimate.
#[must_use]
pub fn bonus_value(
    mode: BudgetMode,
    entered_amount: f64,
    real_value: Option<f64>,
    media_budget: f64,
) -> f64 {
    let real_value = real_value.unwrap_or(0.0);
    if real_value <= 0.0 {
        return 0.0;
    }
    let paid = match mode {
        BudgetMode::Media => entered_amount,
        BudgetMode::Client => media_budget,
    };
    (real_value - paid).max(0.0)
}
