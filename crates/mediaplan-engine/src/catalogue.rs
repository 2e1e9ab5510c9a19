//! Fee catalogue normalization and pre-flight validation.
//!
//! Catalogues arrive from an external provider and are treated as read-only
//! input. The calculators accept them as-is and degrade per slot; the
//! validation here is advisory, for callers that want to surface catalogue
//! problems before editing starts.

use mediaplan_types::{FEE_SLOT_COUNT, FeeCalculationType, FeeDefinition};
use std::collections::HashMap;

use crate::error::BudgetError;

/// The catalogue's fees in cascade evaluation order.
///
/// Sorted ascending by the explicit order attribute; the sort is stable, so
/// duplicate orders keep their catalogue sequence. The 1-based position in
/// the returned sequence is the fee's slot index.
#[must_use]
pub fn ordered_fees(fee_defs: &[FeeDefinition]) -> Vec<&FeeDefinition> {
    let mut ordered: Vec<&FeeDefinition> = fee_defs.iter().collect();
    ordered.sort_by_key(|def| def.order);
    ordered
}

/// Check a catalogue for conditions that would silently degrade row
/// calculations.
///
/// Returns every diagnostic found rather than stopping at the first, so a
/// caller can report the catalogue's state in one pass. An empty `Ok` means
/// the catalogue is clean.
pub fn validate_catalogue(fee_defs: &[FeeDefinition]) -> Result<(), Vec<BudgetError>> {
    let mut diagnostics = Vec::new();

    if fee_defs.len() > FEE_SLOT_COUNT {
        diagnostics.push(BudgetError::catalogue(
            format!(
                "catalogue defines {} fees but rows carry only {FEE_SLOT_COUNT} slots; \
                 the excess fees are never evaluated",
                fee_defs.len()
            ),
            None,
        ));
    }

    let mut seen_orders: HashMap<u32, &str> = HashMap::new();
    for def in fee_defs {
        if let Some(previous) = seen_orders.insert(def.order, def.id.as_str()) {
            diagnostics.push(BudgetError::catalogue(
                format!("fees '{previous}' and '{}' share order {}", def.id, def.order),
                Some(def.id.clone()),
            ));
        }
        if def.options.is_empty() {
            diagnostics.push(BudgetError::catalogue(
                "fee has no selectable options",
                Some(def.id.clone()),
            ));
        }
        if def.calculation == FeeCalculationType::Unknown {
            diagnostics.push(BudgetError::catalogue(
                "fee has an unrecognized calculation type and will evaluate to zero",
                Some(def.id.clone()),
            ));
        }
    }

    if diagnostics.is_empty() { Ok(()) } else { Err(diagnostics) }
}
