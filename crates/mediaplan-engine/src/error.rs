//! Structured error handling for the budget engine
//!
//! The calculation path itself never fails: degraded inputs resolve to
//! neutral numeric values so the editing grid always has a displayable
//! result. Errors exist only at the advisory seams around it — catalogue
//! pre-flight validation and field-key parsing.

use mediaplan_types::ParseFieldError;
use thiserror::Error;

/// Result alias for the engine's fallible seams.
pub type EngineResult<T> = Result<T, BudgetError>;

/// Errors reported by the engine's advisory surfaces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    /// A fee catalogue failed pre-flight validation.
    #[error("catalogue error: {message}")]
    Catalogue {
        /// What is wrong with the catalogue.
        message: String,
        /// Catalogue identifier of the offending fee, when known.
        fee_id: Option<String>,
    },

    /// A field-key string did not parse.
    #[error(transparent)]
    FieldKey(#[from] ParseFieldError),
}

impl BudgetError {
    /// Error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            BudgetError::Catalogue { .. } => "catalogue",
            BudgetError::FieldKey(_) => "field_key",
        }
    }

    /// Convenience constructor for catalogue diagnostics.
    pub fn catalogue(message: impl Into<String>, fee_id: Option<String>) -> Self {
        BudgetError::Catalogue { message: message.into(), fee_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable() {
        assert_eq!(BudgetError::catalogue("dup", None).category(), "catalogue");
        let parse_err: BudgetError =
            "nope".parse::<mediaplan_types::RawField>().unwrap_err().into();
        assert_eq!(parse_err.category(), "field_key");
    }
}
