//! Timeline actions and their transitions.
//!
//! Each [`Action`] variant wraps a concrete action type implementing
//! [`ActionTransition`]. The step executor drives every transition through
//! `pre_validate` then `apply` against a scratch copy of the board, so a
//! failing action never leaks partial effects into the live state.
mod cast;
mod error;
mod facing;
mod movement;
mod outcome;
mod spec;
mod transpose;

pub use cast::CastSpellAction;
pub use error::ActionError;
pub use facing::ChangeFacingAction;
pub use movement::MoveAction;
pub use outcome::{
    ActionEffect, ActionOutcome, CastSpellOutcome, ChangeFacingOutcome, MoveOutcome,
    OutcomeStatus, TransposeOutcome, TransposePartner,
};
pub use spec::ActionSpec;
pub use transpose::TransposeAction;

use crate::engine::{StepEnv, StepScratch};
use crate::state::{EntityId, Facing, Position};

/// Defines how a concrete action mutates the step scratch state.
pub trait ActionTransition {
    type Effect;

    /// Validates preconditions using the scratch state **before** mutation.
    fn pre_validate(&self, _scratch: &StepScratch, _env: &StepEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the scratch state directly.
    fn apply(
        &self,
        scratch: &mut StepScratch,
        env: &StepEnv<'_>,
    ) -> Result<Self::Effect, ActionError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    CastSpell,
    Move,
    Transpose,
    ChangeFacing,
}

/// Tagged action variant as scripted in a timeline step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Action {
    CastSpell(CastSpellAction),
    Move(MoveAction),
    Transpose(TransposeAction),
    ChangeFacing(ChangeFacingAction),
}

impl Action {
    pub fn cast_spell(spell_id: impl Into<String>, target: Position) -> Self {
        Self::CastSpell(CastSpellAction::new(spell_id, target))
    }

    pub fn move_to(target: Position) -> Self {
        Self::Move(MoveAction::new(target))
    }

    pub fn move_entity(entity: EntityId, target: Position) -> Self {
        Self::Move(MoveAction::new(target).for_entity(entity))
    }

    pub fn transpose(target: Position) -> Self {
        Self::Transpose(TransposeAction::new(target))
    }

    pub fn change_facing(facing: Facing) -> Self {
        Self::ChangeFacing(ChangeFacingAction::new(facing))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::CastSpell(_) => ActionKind::CastSpell,
            Self::Move(_) => ActionKind::Move,
            Self::Transpose(_) => ActionKind::Transpose,
            Self::ChangeFacing(_) => ActionKind::ChangeFacing,
        }
    }
}
