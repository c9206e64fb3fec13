use super::{ActionError, ActionTransition, MoveOutcome};
use crate::engine::{StepEnv, StepScratch};
use crate::resources::{ResourceKind, ResourceTotals};
use crate::state::{EntityId, Position};

/// Walks an entity (the player by default) to `target`.
///
/// Costs `move_cost_per_tile` MP per tile of Manhattan distance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub target: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entity: Option<EntityId>,
}

impl MoveAction {
    pub fn new(target: Position) -> Self {
        Self {
            target,
            entity: None,
        }
    }

    pub fn for_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    fn cost(&self, from: Position, env: &StepEnv<'_>) -> u32 {
        from.manhattan_distance(self.target) * env.config.move_cost_per_tile
    }
}

impl ActionTransition for MoveAction {
    type Effect = MoveOutcome;

    fn pre_validate(&self, scratch: &StepScratch, env: &StepEnv<'_>) -> Result<(), ActionError> {
        if !env.config.contains(self.target) {
            return Err(ActionError::InvalidTarget {
                position: self.target,
            });
        }

        let entity = scratch.resolve_entity(self.entity)?;
        if entity.position != self.target && scratch.board.is_occupied(self.target) {
            return Err(ActionError::Occupied {
                position: self.target,
            });
        }

        scratch
            .context
            .resources
            .ensure(ResourceKind::Mp, self.cost(entity.position, env))?;
        Ok(())
    }

    fn apply(
        &self,
        scratch: &mut StepScratch,
        env: &StepEnv<'_>,
    ) -> Result<Self::Effect, ActionError> {
        let entity = scratch.resolve_entity(self.entity)?;
        let (id, from) = (entity.id, entity.position);
        let cost = self.cost(from, env);

        scratch.context.resources.debit(ResourceKind::Mp, cost)?;
        if let Some(entity) = scratch.board.entity_mut(id) {
            entity.position = self.target;
        }

        Ok(MoveOutcome {
            entity: id,
            from,
            to: self.target,
            cost: ResourceTotals {
                mp: cost,
                ..ResourceTotals::default()
            },
        })
    }
}
