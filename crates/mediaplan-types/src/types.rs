use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::fields::fee_slot_key;

/// Number of configurable fee slots carried by every row.
pub const FEE_SLOT_COUNT: usize = 5;

/// Which side of the budget equation the user typed.
///
/// In `Media` mode the entered amount is the media budget and the client
/// budget is derived by adding fees. In `Client` mode the entered amount is
/// the client budget and the media budget must be back-solved, because fees
/// are themselves a function of the media budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// The entered amount is the media budget.
    #[default]
    Media,
    /// The entered amount is the client budget.
    Client,
}

impl fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Media => write!(f, "media"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// How a fee option's final value is turned into an amount.
///
/// Percentage options store fractional rates (0.1 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCalculationType {
    /// Final value is a fractional rate applied to the fee's base budget.
    Percentage,
    /// Final value is a price per purchased unit, multiplied by the volume.
    PerUnitVolume,
    /// Final value is a price per item, multiplied by a user-entered count.
    PerUnitCount,
    /// Final value is the amount.
    Fixed,
    /// Catalogue data carried a calculation type this engine does not
    /// recognize. Evaluates to a zero amount instead of failing the row.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for FeeCalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::PerUnitVolume => write!(f, "per_unit_volume"),
            Self::PerUnitCount => write!(f, "per_unit_count"),
            Self::Fixed => write!(f, "fixed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which base a fee is computed on and whether its amount feeds later fees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBasis {
    /// Computed directly on the media budget; never alters the cumulative
    /// base seen by later fees.
    #[default]
    Media,
    /// Computed on the running cumulative base (media budget plus all prior
    /// cumulative fees) and added to it afterwards.
    Cumulative,
}

/// One selectable option of a fee definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeOption {
    /// Stable option identifier referenced by `FeeSlotInput::option_id`.
    pub id: String,
    /// Base value. A fractional rate for percentage fees, a unit price for
    /// per-unit fees, an amount for fixed fees.
    pub value: f64,
    /// Buffer percentage applied to the base value as
    /// `value * (100 + buffer) / 100`.
    pub buffer_percent: f64,
    /// Whether the user may override the base value with a custom number.
    pub editable: bool,
}

impl FeeOption {
    /// Base value with the buffer applied.
    #[must_use]
    pub fn buffered(&self, base_value: f64) -> f64 {
        base_value * (100.0 + self.buffer_percent) / 100.0
    }
}

/// One fee of a client's catalogue.
///
/// Catalogues hold up to [`FEE_SLOT_COUNT`] fees per client, ordered by the
/// explicit `order` attribute (1..N, gaps allowed). The order-sorted
/// sequence defines both the cascade evaluation order and the positional
/// mapping onto row fee slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeDefinition {
    /// Stable catalogue identifier.
    pub id: String,
    /// Human-readable label shown in the grid header.
    pub label: String,
    /// Explicit order attribute driving cascade evaluation order.
    pub order: u32,
    /// How the selected option's final value becomes an amount.
    pub calculation: FeeCalculationType,
    /// Which base the fee is computed on.
    pub basis: FeeBasis,
    /// Selectable options.
    pub options: Vec<FeeOption>,
}

impl FeeDefinition {
    /// Look up an option by identifier.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&FeeOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Per-row state of one fee slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSlotInput {
    /// Selected option identifier. `None` disables the slot: it contributes
    /// zero and is excluded from cascading bases.
    pub option_id: Option<String>,
    /// Optional custom override. Replaces the option's base value for
    /// percentage/fixed fees when the option is editable; used as the
    /// volume/count for per-unit fees. Ignored unless positive.
    pub custom_value: Option<f64>,
}

impl FeeSlotInput {
    /// Slot with the given option selected and no custom override.
    #[must_use]
    pub fn selected(option_id: impl Into<String>) -> Self {
        Self { option_id: Some(option_id.into()), custom_value: None }
    }

    /// Slot with the given option selected and a custom override.
    #[must_use]
    pub fn with_custom(option_id: impl Into<String>, custom_value: f64) -> Self {
        Self { option_id: Some(option_id.into()), custom_value: Some(custom_value) }
    }

    /// The custom override, if one was supplied and is positive.
    #[must_use]
    pub fn positive_custom(&self) -> Option<f64> {
        self.custom_value.filter(|v| *v > 0.0)
    }
}

/// Raw input of one row, as merged by the row store (persisted state plus
/// pending edits). The engine recomputes everything from this on each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    /// Which side of the budget equation `amount` is.
    pub mode: BudgetMode,
    /// Budget amount entered by the user, in buy-currency units.
    pub amount: f64,
    /// Purchased unit type identifier. Impression-like types ("impression",
    /// "cpm", case-insensitive substring) trigger per-mille volume scaling.
    pub unit_type: String,
    /// Price of one purchased unit (per mille for impression-like types).
    pub unit_price: f64,
    /// Buy-currency code. Display concern only; all arithmetic stays in
    /// buy-currency units.
    pub currency: String,
    /// Declared real/media value of the inventory, used to derive bonus.
    pub real_value: Option<f64>,
    /// The five fee slots, positionally mapped onto the order-sorted
    /// catalogue sequence.
    pub fees: [FeeSlotInput; FEE_SLOT_COUNT],
}

impl BudgetInput {
    /// Row with the given core fields, no bonus declaration, and all fee
    /// slots disabled.
    #[must_use]
    pub fn new(
        mode: BudgetMode,
        amount: f64,
        unit_type: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        Self {
            mode,
            amount,
            unit_type: unit_type.into(),
            unit_price,
            currency: String::new(),
            real_value: None,
            fees: Default::default(),
        }
    }
}

/// Everything the engine derives for one row.
///
/// `client_budget == media_budget + total_fees` holds by construction in
/// both budget modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    /// Spend paid directly to the media vendor, excluding fees.
    pub media_budget: f64,
    /// Total amount billed to the client.
    pub client_budget: f64,
    /// Sum of all applicable fee amounts.
    pub total_fees: f64,
    /// Purchased-unit count derived from the effective budget.
    pub unit_volume: i64,
    /// Value of inventory received beyond what was paid for.
    pub bonus: f64,
    /// Computed amount per fee slot, keyed `fee_1`..`fee_5`.
    pub fee_amounts: BTreeMap<String, f64>,
    /// Whether the computation met its tolerance. Always `true` on the
    /// direct and degenerate paths; `false` when the client-mode solve
    /// exhausted its iteration budget.
    pub converged: bool,
    /// Iterations used by the client-mode solve; `None` when no solve ran.
    pub iterations: Option<u32>,
}

impl BudgetResult {
    /// The "nothing to compute yet" state: every quantity zero, converged.
    #[must_use]
    pub fn zeroed() -> Self {
        let fee_amounts =
            (1..=FEE_SLOT_COUNT).map(|slot| (fee_slot_key(slot), 0.0)).collect();
        Self {
            media_budget: 0.0,
            client_budget: 0.0,
            total_fees: 0.0,
            unit_volume: 0,
            bonus: 0.0,
            fee_amounts,
            converged: true,
            iterations: None,
        }
    }

    /// Amount of the given 1-based fee slot, zero when absent.
    #[must_use]
    pub fn fee_amount(&self, slot: usize) -> f64 {
        self.fee_amounts.get(&fee_slot_key(slot)).copied().unwrap_or(0.0)
    }
}
