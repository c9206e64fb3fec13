use super::SpellProfile;
use crate::state::{Facing, Position, SimulationContext};
use crate::timeline::Build;

/// Everything the damage calculator may look at for a single cast.
#[derive(Clone, Copy, Debug)]
pub struct DamageRequest<'a> {
    pub build: &'a Build,
    pub spell: &'a SpellProfile,
    pub caster: Position,
    pub target: Position,
    pub target_facing: Option<Facing>,
    /// Ledger state before the cast's own costs are paid.
    pub context: &'a SimulationContext,
    pub step: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub damage: u32,
    pub critical: bool,
}

/// External damage/stat calculator. Must be deterministic for a given request.
pub trait DamageOracle: Send + Sync {
    fn roll(&self, request: &DamageRequest<'_>) -> DamageRoll;
}
