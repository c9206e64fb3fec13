use super::{EntityId, Facing, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    Player,
    Enemy,
}

/// A character standing on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Facing,
}

impl Entity {
    pub fn player(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: EntityId::PLAYER,
            kind: EntityKind::Player,
            name: name.into(),
            position,
            facing: Facing::Front,
        }
    }

    pub fn enemy(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            kind: EntityKind::Enemy,
            name: name.into(),
            position,
            facing: Facing::Front,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }
}
