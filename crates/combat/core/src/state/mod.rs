//! Board and run state mutated by step execution.
//!
//! [`BoardState`] is the world (entities, mechanisms, dial hours) and
//! [`SimulationContext`] carries the resource ledger and the step cursor.
//! Both are plain values; history snapshots are deep clones of them.
mod board;
mod common;
mod context;
mod entity;
mod mechanism;

pub use board::BoardState;
pub use common::{EntityId, Facing, Position};
pub use context::SimulationContext;
pub use entity::{Entity, EntityKind};
pub use mechanism::{DialHour, DialHourId, Mechanism, MechanismId, MechanismKind};
