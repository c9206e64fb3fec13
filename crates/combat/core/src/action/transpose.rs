use super::{ActionError, ActionTransition, TransposeOutcome, TransposePartner};
use crate::engine::{StepEnv, StepScratch};
use crate::mechanism::MechanismPlacementEngine;
use crate::observer::SimEvent;
use crate::resources::{ResourceKind, ResourceTotals};
use crate::state::{EntityId, Position};

/// Swaps an entity (the player by default) with whatever stands on `target`.
///
/// The partner may be another entity or a mechanism. Charge-bearing
/// mechanisms gain one charge per swap; a swapped dial drags its ring along.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransposeAction {
    pub target: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entity: Option<EntityId>,
}

impl TransposeAction {
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
}

impl ActionTransition for TransposeAction {
    type Effect = TransposeOutcome;

    fn pre_validate(&self, scratch: &StepScratch, env: &StepEnv<'_>) -> Result<(), ActionError> {
        if !env.config.contains(self.target) {
            return Err(ActionError::InvalidTarget {
                position: self.target,
            });
        }

        let entity = scratch.resolve_entity(self.entity)?;
        if entity.position == self.target {
            return Err(ActionError::NothingToTranspose {
                position: self.target,
            });
        }
        let has_partner = scratch
            .board
            .entity_at(self.target)
            .is_some_and(|other| other.id != entity.id)
            || scratch.board.mechanism_at(self.target).is_some();
        if !has_partner {
            return Err(ActionError::NothingToTranspose {
                position: self.target,
            });
        }

        scratch
            .context
            .resources
            .ensure(ResourceKind::Mp, env.config.transpose_mp_cost)?;
        Ok(())
    }

    fn apply(
        &self,
        scratch: &mut StepScratch,
        env: &StepEnv<'_>,
    ) -> Result<Self::Effect, ActionError> {
        let entity = scratch.resolve_entity(self.entity)?;
        let (id, from) = (entity.id, entity.position);
        let cost = env.config.transpose_mp_cost;
        scratch.context.resources.debit(ResourceKind::Mp, cost)?;

        let other_entity = scratch
            .board
            .entity_at(self.target)
            .map(|other| other.id)
            .filter(|other| *other != id);

        let partner = if let Some(other) = other_entity {
            if let Some(other) = scratch.board.entity_mut(other) {
                other.position = from;
            }
            TransposePartner::Entity(other)
        } else {
            let (mechanism_id, kind) = scratch
                .board
                .mechanism_at(self.target)
                .map(|mechanism| (mechanism.id, mechanism.kind))
                .ok_or(ActionError::NothingToTranspose {
                    position: self.target,
                })?;

            let mut mechanisms = MechanismPlacementEngine::new(&mut scratch.board, env.config);
            mechanisms.relocate(mechanism_id, from)?;
            let charges = if kind.accumulates_charges() {
                mechanisms.add_charges(mechanism_id, 1)?
            } else {
                0
            };

            if kind.accumulates_charges() {
                scratch.emit(SimEvent::MechanismCharged {
                    step: env.step,
                    id: mechanism_id,
                    charges,
                });
            }
            TransposePartner::Mechanism {
                id: mechanism_id,
                charges,
            }
        };

        if let Some(entity) = scratch.board.entity_mut(id) {
            entity.position = self.target;
        }

        Ok(TransposeOutcome {
            entity: id,
            from,
            to: self.target,
            partner,
            cost: ResourceTotals {
                mp: cost,
                ..ResourceTotals::default()
            },
        })
    }
}
