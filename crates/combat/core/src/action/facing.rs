use super::{ActionError, ActionTransition, ChangeFacingOutcome};
use crate::engine::{StepEnv, StepScratch};
use crate::state::Facing;

/// Turns the player. Free.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeFacingAction {
    pub facing: Facing,
}

impl ChangeFacingAction {
    pub fn new(facing: Facing) -> Self {
        Self { facing }
    }
}

impl ActionTransition for ChangeFacingAction {
    type Effect = ChangeFacingOutcome;

    fn pre_validate(&self, scratch: &StepScratch, _env: &StepEnv<'_>) -> Result<(), ActionError> {
        scratch.resolve_entity(None)?;
        Ok(())
    }

    fn apply(
        &self,
        scratch: &mut StepScratch,
        _env: &StepEnv<'_>,
    ) -> Result<Self::Effect, ActionError> {
        let player = scratch.resolve_entity(None)?;
        let (id, from) = (player.id, player.facing);
        if let Some(player) = scratch.board.entity_mut(id) {
            player.facing = self.facing;
        }

        Ok(ChangeFacingOutcome {
            entity: id,
            from,
            to: self.facing,
        })
    }
}
