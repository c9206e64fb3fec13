//! Loosely typed action records as written in timeline files.

use super::{
    Action, ActionError, CastSpellAction, ChangeFacingAction, MoveAction, TransposeAction,
};
use crate::state::{EntityId, Facing, Position};

/// Flat action record: a `type` tag plus every field any action may use.
///
/// Converted into a typed [`Action`] with `TryFrom`, which rejects unknown
/// tags and missing fields before anything runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionSpec {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub spell_id: Option<String>,
    pub entity_id: Option<EntityId>,
    pub target_position: Option<Position>,
    pub target_facing: Option<Facing>,
    pub facing: Option<Facing>,
}

fn missing(action: &str, field: &str) -> ActionError {
    ActionError::MissingField {
        action: action.to_string(),
        field: field.to_string(),
    }
}

impl TryFrom<ActionSpec> for Action {
    type Error = ActionError;

    fn try_from(spec: ActionSpec) -> Result<Self, Self::Error> {
        match spec.kind.as_str() {
            "CastSpell" => {
                let spell_id = spec
                    .spell_id
                    .ok_or_else(|| missing("CastSpell", "spell_id"))?;
                let target = spec
                    .target_position
                    .ok_or_else(|| missing("CastSpell", "target_position"))?;
                Ok(Action::CastSpell(CastSpellAction {
                    spell_id,
                    target,
                    target_facing: spec.target_facing,
                }))
            }
            "Move" => {
                let target = spec
                    .target_position
                    .ok_or_else(|| missing("Move", "target_position"))?;
                Ok(Action::Move(MoveAction {
                    target,
                    entity: spec.entity_id,
                }))
            }
            "Transpose" => {
                let target = spec
                    .target_position
                    .ok_or_else(|| missing("Transpose", "target_position"))?;
                Ok(Action::Transpose(TransposeAction {
                    target,
                    entity: spec.entity_id,
                }))
            }
            "ChangeFacing" => {
                // Older files store the new orientation under `target_facing`.
                let facing = spec
                    .facing
                    .or(spec.target_facing)
                    .ok_or_else(|| missing("ChangeFacing", "facing"))?;
                Ok(Action::ChangeFacing(ChangeFacingAction::new(facing)))
            }
            other => Err(ActionError::UnknownActionType(other.to_string())),
        }
    }
}
