//! Mediaplan Types
//!
//! This crate defines the core types and data structures shared across the
//! mediaplan ecosystem (currently `mediaplan-engine`). It holds the fee
//! catalogue model, the per-row budget input, the engine result, and the
//! raw/derived field keys used by the reactive dependency contract, keeping
//! the dependency graph between crates acyclic.

#![deny(warnings)]
#![deny(missing_docs)]

mod fields;
mod types;

pub use fields::{DerivedField, ParseFieldError, RawField, fee_slot_key};
pub use types::{
    BudgetInput, BudgetMode, BudgetResult, FEE_SLOT_COUNT, FeeBasis, FeeCalculationType,
    FeeDefinition, FeeOption, FeeSlotInput,
};
