#![deny(warnings)]
//! Budget calculation engine for campaign-planning rows.
//!
//! Given a row's raw inputs and a client's fee catalogue, the engine
//! derives the media budget, the client-facing budget, the purchased-unit
//! volume, the bonus value, and the amount of each applicable fee. When the
//! entered amount is the client budget, fees depend on a media budget that
//! must itself be back-solved, which the engine does with a bounded damped
//! fixed-point iteration.
//!
//! The engine is synchronous, stateless, and side-effect-free: every
//! operation is a pure function over its explicit inputs, and no condition
//! in the calculation path raises an error; degraded inputs resolve to
//! neutral numeric values so the editing grid always has a displayable
//! result.

use tracing::{debug, instrument};

/// Leaf calculators: unit volume, bonus, fee cascade
pub mod calc;
/// Fee catalogue normalization and pre-flight validation
pub mod catalogue;
/// Numeric policy constants
pub mod constants;
/// Reactive raw-field to derived-field dependency resolution
pub mod dependency;
/// Display-side currency formatting helpers
pub mod display;
/// Row orchestration
pub mod engine;
/// Structured errors for the engine's advisory seams
pub mod error;
/// Generic damped fixed-point solver
pub mod solver;

// Re-export the public surface so downstream code imports from one place.
pub use calc::fees::FeeBreakdown;
pub use dependency::{dependent_field_keys, dependents};
pub use engine::{BudgetEngine, calculate_budget_for_row};
pub use error::{BudgetError, EngineResult};
pub use solver::{Convergence, SolverConfig, solve_for_target};

// Re-export the shared data model.
pub use mediaplan_types::{
    BudgetInput, BudgetMode, BudgetResult, DerivedField, FEE_SLOT_COUNT, FeeBasis,
    FeeCalculationType, FeeDefinition, FeeOption, FeeSlotInput, RawField, fee_slot_key,
};

/// Initialize the engine components
#[instrument]
pub fn init() -> anyhow::Result<()> {
    debug!("Initializing mediaplan budget engine");
    Ok(())
}
