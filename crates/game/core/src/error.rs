//! Common error infrastructure for storm-core.
//!
//! Domain-specific errors (e.g. [`crate::roll::CheckError`],
//! [`crate::roll::FormulaError`]) live next to the operations that raise them.
//! This module only provides the shared classification used for logging and
//! recovery decisions.
//!
//! Several failure modes are deliberately *not* errors: malformed attribute
//! values coerce to zero, unknown creature HP modes fall back to `auto`, and a
//! duplicate craft slot assignment evicts the older slot.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: dice oracle timed out
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: push on a successful roll, unparsable dice formula
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: oracle returned a d100 total outside 1..=100
    Internal,

    /// Fatal error - the operation cannot produce a result.
    ///
    /// Examples: missing dice oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all storm-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
