//! Snapshot stack over the board, indexed by step number.

use super::NavigationError;
use crate::state::{BoardState, SimulationContext};

/// Deep copy of the board (and the context beside it) after `index` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub index: usize,
    pub board: BoardState,
    pub context: SimulationContext,
}

/// Ordered snapshots; index 0 is the state before the first step.
///
/// Snapshots are owned copies, so mutating the live board never reaches
/// history.
#[derive(Clone, Debug, Default)]
pub struct BoardStateHistory {
    snapshots: Vec<BoardSnapshot>,
}

impl BoardStateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any previous history and records index 0.
    pub fn save_initial(&mut self, board: &BoardState, context: SimulationContext) {
        self.snapshots.clear();
        self.snapshots.push(BoardSnapshot {
            index: 0,
            board: board.clone(),
            context,
        });
    }

    /// Appends a snapshot at the next sequential index and returns it.
    pub fn push(&mut self, board: &BoardState, context: SimulationContext) -> usize {
        let index = self.snapshots.len();
        self.snapshots.push(BoardSnapshot {
            index,
            board: board.clone(),
            context,
        });
        index
    }

    /// Returns snapshot `index` and discards every later one.
    pub fn restore_at_index(&mut self, index: usize) -> Result<BoardSnapshot, NavigationError> {
        let snapshot = self
            .snapshots
            .get(index)
            .cloned()
            .ok_or(NavigationError::IndexOutOfRange {
                index,
                len: self.snapshots.len(),
            })?;
        self.snapshots.truncate(index + 1);
        Ok(snapshot)
    }

    pub fn get(&self, index: usize) -> Option<&BoardSnapshot> {
        self.snapshots.get(index)
    }

    pub fn latest(&self) -> Option<&BoardSnapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
