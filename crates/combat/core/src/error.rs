//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ActionError`, `OracleError`, `NavigationError`)
//! live next to the code that produces them. This module holds the shared
//! classification used by the runtime to decide how loudly to report them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the timeline can be edited and the step retried
/// - **Validation**: malformed input that must be corrected before retrying
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: a required collaborator is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not enough AP, destination occupied.
    Recoverable,

    /// Examples: target off the board, spell missing from the build.
    Validation,

    /// Examples: mechanism id referenced but not on the board.
    Internal,

    /// Examples: spell catalog not wired into the environment.
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

    /// Returns true if this error indicates an internal bug or missing wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable error code for programmatic matching and logs.
    ///
    /// Format: `MODULE_ERROR_NAME` (e.g. `ACTION_INSUFFICIENT_RESOURCE`).
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
