use crate::action::ActionError;
use crate::config::SimConfig;
use crate::env::SimEnv;
use crate::observer::SimEvent;
use crate::resources::RegenerationTracker;
use crate::state::{BoardState, Entity, EntityId, Position, SimulationContext};
use crate::timeline::Build;

/// Read-only inputs shared by every action of a step.
#[derive(Clone, Copy, Debug)]
pub struct StepEnv<'a> {
    pub oracles: SimEnv<'a>,
    pub build: &'a Build,
    pub config: &'a SimConfig,
    /// Index of the step being executed.
    pub step: usize,
}

/// Working copy a step mutates before it commits.
///
/// The executor builds one from the live state, runs every action against
/// it, and swaps it in only when all of them succeed.
#[derive(Clone, Debug)]
pub struct StepScratch {
    pub board: BoardState,
    pub context: SimulationContext,
    /// Regeneration staged by this step only.
    pub regenerations: RegenerationTracker,
    /// Observer events released on commit.
    pub(crate) pending: Vec<SimEvent>,
}

impl StepScratch {
    pub fn new(board: BoardState, context: SimulationContext) -> Self {
        Self {
            board,
            context,
            regenerations: RegenerationTracker::new(),
            pending: Vec::new(),
        }
    }

    /// Resolves an optional entity reference, defaulting to the player.
    pub fn resolve_entity(&self, entity: Option<EntityId>) -> Result<&Entity, ActionError> {
        match entity {
            Some(id) => self.board.entity(id).ok_or(ActionError::EntityNotFound(id)),
            None => self
                .board
                .player()
                .ok_or(ActionError::EntityNotFound(EntityId::PLAYER)),
        }
    }

    /// Where the caster stands, or the configured fallback when no player is
    /// on the board.
    pub fn caster_position(&self, config: &SimConfig) -> Position {
        self.board
            .player()
            .map(|player| player.position)
            .unwrap_or(config.default_caster_position)
    }

    pub(crate) fn emit(&mut self, event: SimEvent) {
        self.pending.push(event);
    }
}
