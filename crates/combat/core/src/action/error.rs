//! Errors raised while validating or applying a single action.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, SimError};
use crate::mechanism::MechanismError;
use crate::resources::{InsufficientResource, ResourceKind};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("insufficient {kind} (need {required}, have {available})")]
    InsufficientResource {
        kind: ResourceKind,
        required: u32,
        available: u32,
    },

    #[error("target {position} is outside the board")]
    InvalidTarget { position: Position },

    #[error("unknown action type: {0}")]
    UnknownActionType(String),

    #[error("{action} action is missing required field `{field}`")]
    MissingField { action: String, field: String },

    #[error("spell not found in catalog: {0}")]
    UnknownSpell(String),

    #[error("spell not found in build: {0}")]
    SpellNotInBuild(String),

    #[error("entity {0} not found on the board")]
    EntityNotFound(EntityId),

    #[error("tile {position} is already occupied")]
    Occupied { position: Position },

    #[error("nothing to swap with at {position}")]
    NothingToTranspose { position: Position },

    #[error("a regulator must be placed on a dial hour, {position} is not one")]
    RegulatorOffDial { position: Position },

    #[error(transparent)]
    Mechanism(#[from] MechanismError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl From<InsufficientResource> for ActionError {
    fn from(err: InsufficientResource) -> Self {
        Self::InsufficientResource {
            kind: err.kind,
            required: err.required,
            available: err.available,
        }
    }
}

impl SimError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. }
            | Self::Occupied { .. }
            | Self::NothingToTranspose { .. }
            | Self::RegulatorOffDial { .. } => ErrorSeverity::Recoverable,
            Self::InvalidTarget { .. }
            | Self::UnknownActionType(_)
            | Self::MissingField { .. }
            | Self::UnknownSpell(_)
            | Self::SpellNotInBuild(_)
            | Self::EntityNotFound(_) => ErrorSeverity::Validation,
            Self::Mechanism(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Self::InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            Self::UnknownActionType(_) => "ACTION_UNKNOWN_TYPE",
            Self::MissingField { .. } => "ACTION_MISSING_FIELD",
            Self::UnknownSpell(_) => "ACTION_UNKNOWN_SPELL",
            Self::SpellNotInBuild(_) => "ACTION_SPELL_NOT_IN_BUILD",
            Self::EntityNotFound(_) => "ACTION_ENTITY_NOT_FOUND",
            Self::Occupied { .. } => "ACTION_OCCUPIED",
            Self::NothingToTranspose { .. } => "ACTION_NOTHING_TO_TRANSPOSE",
            Self::RegulatorOffDial { .. } => "ACTION_REGULATOR_OFF_DIAL",
            Self::Mechanism(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_resource_converts_and_formats() {
        let err: ActionError = InsufficientResource {
            kind: ResourceKind::Wp,
            required: 2,
            available: 1,
        }
        .into();
        assert_eq!(err.to_string(), "insufficient WP (need 2, have 1)");
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.error_code(), "ACTION_INSUFFICIENT_RESOURCE");
    }

    #[test]
    fn missing_oracle_is_fatal() {
        let err = ActionError::from(OracleError::SpellsNotAvailable);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }
}
