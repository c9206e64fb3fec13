//! Oracle access errors.

use crate::error::{ErrorSeverity, SimError};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle means the environment was wired incorrectly, so these
/// are fatal; the step cannot be evaluated at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SpellOracle not available")]
    SpellsNotAvailable,

    #[error("DamageOracle not available")]
    DamageNotAvailable,
}

impl SimError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SpellsNotAvailable => "ORACLE_SPELLS_NOT_AVAILABLE",
            Self::DamageNotAvailable => "ORACLE_DAMAGE_NOT_AVAILABLE",
        }
    }
}
