//! Board loader.
//!
//! Board files list the player and the enemies with their starting tiles.
//! Mechanisms and dial hours always start empty; they only appear through
//! casts.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{BoardState, Entity, EntityId, Facing, Position, SimConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub name: String,
    pub position: (i32, i32),
    #[serde(default)]
    pub facing: Facing,
}

/// Board structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    #[serde(default = "BoardSpec::default_player_name")]
    pub player_name: String,
    pub player: (i32, i32),
    #[serde(default)]
    pub player_facing: Facing,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
}

impl BoardSpec {
    fn default_player_name() -> String {
        "player".to_string()
    }

    /// Builds the board, numbering enemies from 1 in file order.
    ///
    /// Every entity must stand on the board and no two may share a tile.
    pub fn into_board(self, config: &SimConfig) -> LoadResult<BoardState> {
        let mut occupied = HashSet::new();
        let mut place = |name: &str, (x, y): (i32, i32)| -> LoadResult<Position> {
            let position = Position::new(x, y);
            if !config.contains(position) {
                anyhow::bail!("{} starts off the board at {}", name, position);
            }
            if !occupied.insert(position) {
                anyhow::bail!("{} starts on occupied tile {}", name, position);
            }
            Ok(position)
        };

        let mut entities = Vec::with_capacity(self.enemies.len() + 1);
        let player_position = place(&self.player_name, self.player)?;
        entities.push(Entity::player(self.player_name, player_position).with_facing(self.player_facing));

        for (index, enemy) in self.enemies.into_iter().enumerate() {
            let position = place(&enemy.name, enemy.position)?;
            let id = EntityId(index as u32 + 1);
            entities.push(Entity::enemy(id, enemy.name, position).with_facing(enemy.facing));
        }

        Ok(BoardState::new(entities))
    }
}

/// Loader for starting boards from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// The board bundled with the crate.
    pub fn embedded(config: &SimConfig) -> LoadResult<BoardState> {
        Self::parse(include_str!("../../data/boards/default.ron"), config)
    }

    pub fn load(path: &Path, config: &SimConfig) -> LoadResult<BoardState> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &SimConfig) -> LoadResult<BoardState> {
        let spec: BoardSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;
        spec.into_board(config)
    }
}
