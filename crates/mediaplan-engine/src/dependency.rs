//! Reactive dependency resolution.
//!
//! The consuming grid asks, after an edit, which derived cells need a
//! refresh. The answer is a lookup in a static bipartite graph from raw
//! fields to derived fields: row-level fields invalidate every derived
//! field, a fee slot's fields invalidate only that fee's amount, total
//! fees, media budget, and client budget, and anything else has no
//! dependents. Adding a derived field is a change to the graph data, not
//! to resolution code.

use std::collections::HashMap;
use std::sync::LazyLock;

use mediaplan_types::{DerivedField, FEE_SLOT_COUNT, RawField};

static GRAPH: LazyLock<HashMap<RawField, Vec<DerivedField>>> = LazyLock::new(build_graph);

fn all_derived_fields() -> Vec<DerivedField> {
    let mut fields = vec![
        DerivedField::UnitVolume,
        DerivedField::MediaBudget,
        DerivedField::ClientBudget,
        DerivedField::Bonus,
        DerivedField::TotalFees,
    ];
    fields.extend((1..=FEE_SLOT_COUNT).map(|slot| DerivedField::FeeAmount(slot as u8)));
    fields
}

fn build_graph() -> HashMap<RawField, Vec<DerivedField>> {
    let mut graph = HashMap::new();

    for field in [
        RawField::BudgetMode,
        RawField::BudgetAmount,
        RawField::UnitPrice,
        RawField::UnitType,
        RawField::RealValue,
    ] {
        graph.insert(field, all_derived_fields());
    }

    // A fee edit cannot move volume or bonus: fee computation depends on
    // them but does not feed back into them on the media-mode path, and in
    // client mode the orchestrator recomputes the whole row anyway.
    for slot in 1..=FEE_SLOT_COUNT {
        let slot = slot as u8;
        graph.insert(
            RawField::FeeSlot(slot),
            vec![
                DerivedField::FeeAmount(slot),
                DerivedField::TotalFees,
                DerivedField::MediaBudget,
                DerivedField::ClientBudget,
            ],
        );
    }

    graph
}

/// Derived fields that must be recomputed after the given raw field
/// changed.
#[must_use]
pub fn dependents(changed: RawField) -> &'static [DerivedField] {
    GRAPH.get(&changed).map(Vec::as_slice).unwrap_or(&[])
}

/// String-key form of [`dependents`] for the grid.
///
/// Keys that name no known raw field resolve to an empty set.
#[must_use]
pub fn dependent_field_keys(changed_key: &str) -> Vec<String> {
    changed_key
        .parse::<RawField>()
        .map(|field| dependents(field).iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}
