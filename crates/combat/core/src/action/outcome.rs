//! Per-action results reported in a [`crate::engine::StepResult`].

use super::ActionKind;
use crate::mechanism::MechanismPlacement;
use crate::resources::ResourceTotals;
use crate::state::{EntityId, Facing, MechanismId, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSpellOutcome {
    pub spell_id: String,
    pub target: Position,
    pub cost: ResourceTotals,
    pub damage: u32,
    pub critical: bool,
    pub mechanism: MechanismPlacement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
    pub cost: ResourceTotals,
}

/// What the transposed entity swapped places with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransposePartner {
    Entity(EntityId),
    Mechanism {
        id: MechanismId,
        /// Charge count after the swap.
        charges: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransposeOutcome {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
    pub partner: TransposePartner,
    pub cost: ResourceTotals,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeFacingOutcome {
    pub entity: EntityId,
    pub from: Facing,
    pub to: Facing,
}

/// Closed union of per-kind results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    CastSpell(CastSpellOutcome),
    Move(MoveOutcome),
    Transpose(TransposeOutcome),
    ChangeFacing(ChangeFacingOutcome),
}

impl ActionEffect {
    pub fn cost(&self) -> ResourceTotals {
        match self {
            Self::CastSpell(outcome) => outcome.cost,
            Self::Move(outcome) => outcome.cost,
            Self::Transpose(outcome) => outcome.cost,
            Self::ChangeFacing(_) => ResourceTotals::default(),
        }
    }

    pub fn damage(&self) -> u32 {
        match self {
            Self::CastSpell(outcome) => outcome.damage,
            _ => 0,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::CastSpell(outcome) if outcome.critical)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    /// Not attempted because an earlier action in the step failed.
    Skipped,
}

/// One entry per action of a step, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub index: usize,
    pub kind: ActionKind,
    pub status: OutcomeStatus,
    pub ap_cost: u32,
    pub wp_cost: u32,
    pub mp_cost: u32,
    pub ap_regenerated: u32,
    pub wp_regenerated: u32,
    pub damage: u32,
    pub message: String,
    pub effect: Option<ActionEffect>,
}

impl ActionOutcome {
    pub(crate) fn succeeded(
        index: usize,
        kind: ActionKind,
        effect: ActionEffect,
        regenerated: ResourceTotals,
    ) -> Self {
        let cost = effect.cost();
        Self {
            index,
            kind,
            status: OutcomeStatus::Succeeded,
            ap_cost: cost.ap,
            wp_cost: cost.wp,
            mp_cost: cost.mp,
            ap_regenerated: regenerated.ap,
            wp_regenerated: regenerated.wp,
            damage: effect.damage(),
            message: describe(&effect),
            effect: Some(effect),
        }
    }

    pub(crate) fn failed(index: usize, kind: ActionKind, message: String) -> Self {
        Self::empty(index, kind, OutcomeStatus::Failed, message)
    }

    pub(crate) fn skipped(index: usize, kind: ActionKind) -> Self {
        Self::empty(
            index,
            kind,
            OutcomeStatus::Skipped,
            "skipped: an earlier action in this step failed".to_string(),
        )
    }

    fn empty(index: usize, kind: ActionKind, status: OutcomeStatus, message: String) -> Self {
        Self {
            index,
            kind,
            status,
            ap_cost: 0,
            wp_cost: 0,
            mp_cost: 0,
            ap_regenerated: 0,
            wp_regenerated: 0,
            damage: 0,
            message,
            effect: None,
        }
    }

    pub fn success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }

    pub fn is_critical(&self) -> bool {
        self.effect.as_ref().is_some_and(ActionEffect::is_critical)
    }
}

fn describe(effect: &ActionEffect) -> String {
    match effect {
        ActionEffect::CastSpell(outcome) => {
            let mut message = format!(
                "cast {} at {} for {} damage",
                outcome.spell_id, outcome.target, outcome.damage
            );
            if outcome.critical {
                message.push_str(" (critical)");
            }
            match outcome.mechanism {
                MechanismPlacement::Created { kind, hours, .. } if hours > 0 => {
                    message.push_str(&format!(", placed {kind} with {hours} hours"));
                }
                MechanismPlacement::Created { kind, .. } => {
                    message.push_str(&format!(", placed {kind}"));
                }
                MechanismPlacement::AlreadyPresent { kind, .. } => {
                    message.push_str(&format!(", {kind} already on the board"));
                }
                MechanismPlacement::NotMechanism => {}
            }
            message
        }
        ActionEffect::Move(outcome) => {
            format!("moved {} from {} to {}", outcome.entity, outcome.from, outcome.to)
        }
        ActionEffect::Transpose(outcome) => match outcome.partner {
            TransposePartner::Entity(other) => {
                format!("swapped {} with {} at {}", outcome.entity, other, outcome.to)
            }
            TransposePartner::Mechanism { id, charges } => format!(
                "swapped {} with mechanism {} at {} ({} charges)",
                outcome.entity, id, outcome.to, charges
            ),
        },
        ActionEffect::ChangeFacing(outcome) => {
            format!("{} now faces {}", outcome.entity, outcome.to)
        }
    }
}
