//! Action transition dispatch.

use crate::action::{Action, ActionEffect, ActionError, ActionTransition};

use super::errors::{TransitionPhase, TransitionPhaseError};
use super::scratch::{StepEnv, StepScratch};

/// Runs a transition through `pre_validate` then `apply`.
#[inline]
fn drive_transition<T>(
    transition: &T,
    scratch: &mut StepScratch,
    env: &StepEnv<'_>,
) -> Result<T::Effect, TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(scratch, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(scratch, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))
}

/// Routes an action to its transition and wraps the result in [`ActionEffect`].
pub(super) fn execute_transition(
    action: &Action,
    scratch: &mut StepScratch,
    env: &StepEnv<'_>,
) -> Result<ActionEffect, TransitionPhaseError<ActionError>> {
    match action {
        Action::CastSpell(transition) => {
            drive_transition(transition, scratch, env).map(ActionEffect::CastSpell)
        }
        Action::Move(transition) => drive_transition(transition, scratch, env).map(ActionEffect::Move),
        Action::Transpose(transition) => {
            drive_transition(transition, scratch, env).map(ActionEffect::Transpose)
        }
        Action::ChangeFacing(transition) => {
            drive_transition(transition, scratch, env).map(ActionEffect::ChangeFacing)
        }
    }
}
