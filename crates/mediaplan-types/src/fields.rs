//! Field keys for the reactive dependency contract.
//!
//! The consuming grid addresses cells by snake_case string keys. These enums
//! are the typed form of that contract; `Display`/`FromStr` define the
//! stable string spelling, and serde round-trips through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::FEE_SLOT_COUNT;

/// String key of a fee slot, 1-based (`fee_1`..`fee_5`).
#[must_use]
pub fn fee_slot_key(slot: usize) -> String {
    format!("fee_{slot}")
}

/// A field-key string that does not name a known raw or derived field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFieldError {
    /// The key matched no known field spelling.
    #[error("unrecognized field key '{key}'")]
    Unrecognized {
        /// The offending key.
        key: String,
    },
    /// The key named a fee slot outside the supported range.
    #[error("fee slot {slot} is outside 1..={max}", max = FEE_SLOT_COUNT)]
    SlotOutOfRange {
        /// The offending slot index.
        slot: usize,
    },
}

/// A raw (user-editable) field of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RawField {
    /// Which side of the budget equation the user types (`budget_mode`).
    BudgetMode,
    /// The entered budget amount (`budget_amount`).
    BudgetAmount,
    /// Price of one purchased unit (`unit_price`).
    UnitPrice,
    /// Purchased unit type identifier (`unit_type`).
    UnitType,
    /// Declared real/media value driving bonus (`real_value`).
    RealValue,
    /// Any editable part of the 1-based fee slot: option selection or
    /// custom override (`fee_N`, `fee_N_option`, `fee_N_custom`).
    FeeSlot(u8),
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetMode => write!(f, "budget_mode"),
            Self::BudgetAmount => write!(f, "budget_amount"),
            Self::UnitPrice => write!(f, "unit_price"),
            Self::UnitType => write!(f, "unit_type"),
            Self::RealValue => write!(f, "real_value"),
            Self::FeeSlot(slot) => write!(f, "fee_{slot}"),
        }
    }
}

impl FromStr for RawField {
    type Err = ParseFieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "budget_mode" => return Ok(Self::BudgetMode),
            "budget_amount" => return Ok(Self::BudgetAmount),
            "unit_price" => return Ok(Self::UnitPrice),
            "unit_type" => return Ok(Self::UnitType),
            "real_value" => return Ok(Self::RealValue),
            _ => {}
        }
        // Slot spellings: fee_N, fee_N_option, fee_N_custom.
        if let Some(rest) = key.strip_prefix("fee_") {
            let digits = rest.split('_').next().unwrap_or(rest);
            let suffix = rest.strip_prefix(digits).unwrap_or("");
            if matches!(suffix, "" | "_option" | "_custom") {
                if let Ok(slot) = digits.parse::<usize>() {
                    if (1..=FEE_SLOT_COUNT).contains(&slot) {
                        return Ok(Self::FeeSlot(slot as u8));
                    }
                    return Err(ParseFieldError::SlotOutOfRange { slot });
                }
            }
        }
        Err(ParseFieldError::Unrecognized { key: key.to_string() })
    }
}

impl From<RawField> for String {
    fn from(field: RawField) -> Self {
        field.to_string()
    }
}

impl TryFrom<String> for RawField {
    type Error = ParseFieldError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

/// A derived (engine-computed) field of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DerivedField {
    /// Purchased-unit count (`unit_volume`).
    UnitVolume,
    /// Media budget (`media_budget`).
    MediaBudget,
    /// Client budget (`client_budget`).
    ClientBudget,
    /// Bonus value (`bonus`).
    Bonus,
    /// Sum of all fee amounts (`total_fees`).
    TotalFees,
    /// Computed amount of the 1-based fee slot (`fee_N_amount`).
    FeeAmount(u8),
}

impl fmt::Display for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitVolume => write!(f, "unit_volume"),
            Self::MediaBudget => write!(f, "media_budget"),
            Self::ClientBudget => write!(f, "client_budget"),
            Self::Bonus => write!(f, "bonus"),
            Self::TotalFees => write!(f, "total_fees"),
            Self::FeeAmount(slot) => write!(f, "fee_{slot}_amount"),
        }
    }
}

impl FromStr for DerivedField {
    type Err = ParseFieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "unit_volume" => return Ok(Self::UnitVolume),
            "media_budget" => return Ok(Self::MediaBudget),
            "client_budget" => return Ok(Self::ClientBudget),
            "bonus" => return Ok(Self::Bonus),
            "total_fees" => return Ok(Self::TotalFees),
            _ => {}
        }
        if let Some(rest) = key.strip_prefix("fee_") {
            if let Some(digits) = rest.strip_suffix("_amount") {
                if let Ok(slot) = digits.parse::<usize>() {
                    if (1..=FEE_SLOT_COUNT).contains(&slot) {
                        return Ok(Self::FeeAmount(slot as u8));
                    }
                    return Err(ParseFieldError::SlotOutOfRange { slot });
                }
            }
        }
        Err(ParseFieldError::Unrecognized { key: key.to_string() })
    }
}

impl From<DerivedField> for String {
    fn from(field: DerivedField) -> Self {
        field.to_string()
    }
}

impl TryFrom<String> for DerivedField {
    type Error = ParseFieldError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}
