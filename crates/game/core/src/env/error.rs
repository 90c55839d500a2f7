//! Dice oracle errors.

use crate::error::{ErrorSeverity, GameError};
use crate::roll::FormulaError;

/// Errors reported by a [`super::DiceOracle`].
///
/// Any of these leaves the requesting check unresolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No oracle is attached to the caller.
    #[error("dice oracle not available")]
    NotAvailable,

    /// The oracle could not evaluate the formula.
    #[error("invalid dice formula: {0}")]
    Formula(#[from] FormulaError),

    /// The oracle did not answer (timeout, disconnected host).
    #[error("dice oracle returned no result: {0}")]
    NoResult(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::NotAvailable => ErrorSeverity::Fatal,
            OracleError::Formula(_) => ErrorSeverity::Validation,
            OracleError::NoResult(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::NotAvailable => "ORACLE_NOT_AVAILABLE",
            OracleError::Formula(_) => "ORACLE_INVALID_FORMULA",
            OracleError::NoResult(_) => "ORACLE_NO_RESULT",
        }
    }
}
