use super::{ActionError, ActionTransition, CastSpellOutcome};
use crate::engine::{StepEnv, StepScratch};
use crate::env::{DamageRequest, SpellProfile};
use crate::mechanism::{MechanismPlacement, MechanismPlacementEngine};
use crate::observer::SimEvent;
use crate::resources::{ResourceKind, ResourceTotals, sources};
use crate::state::{Facing, MechanismKind, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSpellAction {
    pub spell_id: String,
    pub target: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_facing: Option<Facing>,
}

impl CastSpellAction {
    pub fn new(spell_id: impl Into<String>, target: Position) -> Self {
        Self {
            spell_id: spell_id.into(),
            target,
            target_facing: None,
        }
    }

    pub fn with_target_facing(mut self, facing: Facing) -> Self {
        self.target_facing = Some(facing);
        self
    }

    fn profile<'a>(&self, env: &StepEnv<'a>) -> Result<&'a SpellProfile, ActionError> {
        env.oracles
            .spells()?
            .spell(&self.spell_id)
            .ok_or_else(|| ActionError::UnknownSpell(self.spell_id.clone()))
    }
}

impl ActionTransition for CastSpellAction {
    type Effect = CastSpellOutcome;

    fn pre_validate(&self, scratch: &StepScratch, env: &StepEnv<'_>) -> Result<(), ActionError> {
        if !env.config.contains(self.target) {
            return Err(ActionError::InvalidTarget {
                position: self.target,
            });
        }
        if !env.build.owns_spell(&self.spell_id) {
            return Err(ActionError::SpellNotInBuild(self.spell_id.clone()));
        }

        let spell = self.profile(env)?;
        env.oracles.damage()?;

        let ledger = &scratch.context.resources;
        ledger.ensure(ResourceKind::Ap, spell.ap_cost)?;
        ledger.ensure(ResourceKind::Wp, spell.wp_cost)?;

        // A kind already on the board is a no-op, so only fresh placements
        // need a free tile.
        if let Some(kind) = spell.mechanism
            && scratch.board.mechanism_of_kind(kind).is_none()
            && scratch.board.is_occupied(self.target)
        {
            return Err(ActionError::Occupied {
                position: self.target,
            });
        }

        if spell.mechanism == Some(MechanismKind::Regulator)
            && scratch.board.dial_hour_at(self.target).is_none()
        {
            return Err(ActionError::RegulatorOffDial {
                position: self.target,
            });
        }

        Ok(())
    }

    fn apply(
        &self,
        scratch: &mut StepScratch,
        env: &StepEnv<'_>,
    ) -> Result<Self::Effect, ActionError> {
        let spell = self.profile(env)?;
        let caster = scratch.caster_position(env.config);

        // Roll against the ledger as it stood before this cast paid.
        let roll = env.oracles.damage()?.roll(&DamageRequest {
            build: env.build,
            spell,
            caster,
            target: self.target,
            target_facing: self.target_facing,
            context: &scratch.context,
            step: env.step,
        });

        scratch
            .context
            .resources
            .debit(ResourceKind::Ap, spell.ap_cost)?;
        scratch
            .context
            .resources
            .debit(ResourceKind::Wp, spell.wp_cost)?;

        let placement = MechanismPlacementEngine::new(&mut scratch.board, env.config).place(
            spell.mechanism,
            &spell.id,
            self.target,
            caster,
            env.step,
        );
        match placement {
            MechanismPlacement::Created { id, kind, hours } => {
                scratch.emit(SimEvent::MechanismCreated {
                    step: env.step,
                    id,
                    kind,
                    position: self.target,
                });
                if let Some(orientation) = scratch.board.mechanism(id).and_then(|m| m.orientation) {
                    scratch.emit(SimEvent::DialRingPlaced {
                        step: env.step,
                        dial: id,
                        hours,
                        orientation,
                    });
                }
            }
            MechanismPlacement::AlreadyPresent { kind, existing } => {
                scratch.emit(SimEvent::MechanismSkipped {
                    step: env.step,
                    kind,
                    existing,
                });
            }
            MechanismPlacement::NotMechanism => {}
        }

        for grant in &spell.grants {
            let source = sources::spell(&spell.id);
            scratch.context.resources.regenerate(
                grant.kind,
                grant.amount,
                source.clone(),
                env.step,
                &mut scratch.regenerations,
            );
            scratch.emit(SimEvent::ResourceRegenerated {
                step: env.step,
                source,
                kind: grant.kind,
                amount: grant.amount,
            });
        }

        Ok(CastSpellOutcome {
            spell_id: spell.id.clone(),
            target: self.target,
            cost: ResourceTotals {
                ap: spell.ap_cost,
                wp: spell.wp_cost,
                mp: 0,
            },
            damage: roll.damage,
            critical: roll.critical,
            mechanism: placement,
        })
    }
}
