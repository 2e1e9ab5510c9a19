//! Fee cascade evaluator.
//!
//! Computes each of the up to five ordered fees of a row. The catalogue's
//! order-sorted sequence defines both the evaluation order and the
//! positional mapping onto the row's fee slots (slot index = 1-based
//! position in the sequence). A running cumulative base starts at the media
//! budget; cumulative-basis fees feed it, media-basis fees never do, so
//! swapping two fees with different bases changes downstream amounts.
//! That cascading is intentional behavior.

use std::collections::BTreeMap;

use mediaplan_types::{
    BudgetInput, FEE_SLOT_COUNT, FeeBasis, FeeCalculationType, FeeDefinition, fee_slot_key,
};
use tracing::warn;

use crate::calc::round_amount;
use crate::catalogue;

/// Per-slot fee amounts plus their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    /// Sum of all fee amounts, rounded to 2 decimals.
    pub total: f64,
    /// Computed amount per fee slot, keyed `fee_1`..`fee_5`. Disabled and
    /// unmatched slots carry 0.
    pub amounts: BTreeMap<String, f64>,
}

impl Default for FeeBreakdown {
    fn default() -> Self {
        let amounts = (1..=FEE_SLOT_COUNT).map(|slot| (fee_slot_key(slot), 0.0)).collect();
        Self { total: 0.0, amounts }
    }
}

/// Evaluate the fee cascade for one row at the given media-budget estimate.
///
/// Degraded slots (no selected option, option missing from the catalogue,
/// unrecognized calculation type) contribute zero and are excluded from the
/// cumulative base; nothing here returns an error.
#[must_use]
pub fn evaluate_cascade(
    input: &BudgetInput,
    fee_defs: &[FeeDefinition],
    media_budget: f64,
    unit_volume: i64,
) -> FeeBreakdown {
    let mut breakdown = FeeBreakdown::default();
    let mut cumulative_base = media_budget;

    let ordered = catalogue::ordered_fees(fee_defs);
    for (index, def) in ordered.iter().take(FEE_SLOT_COUNT).enumerate() {
        let slot_input = &input.fees[index];
        let Some(option_id) = slot_input.option_id.as_deref() else {
            continue;
        };
        let Some(option) = def.option(option_id) else {
            warn!(
                fee_id = %def.id,
                option_id,
                "selected fee option is not in the catalogue, slot contributes zero"
            );
            continue;
        };

        let custom = slot_input.positive_custom();
        let base_value = match def.calculation {
            FeeCalculationType::Percentage | FeeCalculationType::Fixed if option.editable => {
                custom.unwrap_or(option.value)
            }
            _ => option.value,
        };
        let final_value = option.buffered(base_value);

        let amount = match def.calculation {
            FeeCalculationType::Percentage => {
                let base = match def.basis {
                    FeeBasis::Media => media_budget,
                    FeeBasis::Cumulative => cumulative_base,
                };
                final_value * base
            }
            FeeCalculationType::PerUnitVolume => {
                final_value * custom.unwrap_or(unit_volume as f64)
            }
            FeeCalculationType::PerUnitCount => final_value * custom.unwrap_or(1.0),
            FeeCalculationType::Fixed => final_value,
            FeeCalculationType::Unknown => {
                warn!(
                    fee_id = %def.id,
                    "unrecognized fee calculation type, slot contributes zero"
                );
                continue;
            }
        };

        let amount = round_amount(amount);
        breakdown.amounts.insert(fee_slot_key(index + 1), amount);
        breakdown.total += amount;
        if def.basis == FeeBasis::Cumulative {
            cumulative_base += amount;
        }
    }

    breakdown.total = round_amount(breakdown.total);
    breakdown
}
