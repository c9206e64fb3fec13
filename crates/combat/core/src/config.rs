use crate::state::Position;

/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Side length of the square board. Valid coordinates are `[0, board_size)`.
    pub board_size: i32,
    /// Movement points charged for a single transposition.
    pub transpose_mp_cost: u32,
    /// Movement points charged per tile of Manhattan distance on a move.
    pub move_cost_per_tile: u32,
    /// Caster origin used for dial orientation when no player is on the board.
    pub default_caster_position: Position,
}

impl SimConfig {
    // ===== fixed game rules =====
    /// Number of hour markers around a dial.
    pub const DIAL_HOURS: usize = 12;
    /// Upper bound on charges a gear or sinistro can hold.
    pub const MAX_MECHANISM_CHARGES: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: i32 = 13;
    pub const DEFAULT_TRANSPOSE_MP_COST: u32 = 1;
    pub const DEFAULT_MOVE_COST_PER_TILE: u32 = 1;
    pub const DEFAULT_CASTER_POSITION: Position = Position::new(6, 6);

    pub const fn new() -> Self {
        Self {
            board_size: Self::DEFAULT_BOARD_SIZE,
            transpose_mp_cost: Self::DEFAULT_TRANSPOSE_MP_COST,
            move_cost_per_tile: Self::DEFAULT_MOVE_COST_PER_TILE,
            default_caster_position: Self::DEFAULT_CASTER_POSITION,
        }
    }

    /// Returns true if `position` lies on the board.
    pub const fn contains(&self, position: Position) -> bool {
        position.in_bounds(self.board_size)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
