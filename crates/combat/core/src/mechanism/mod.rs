//! Mechanism placement and dial ring geometry.
mod placement;
mod ring;

pub use placement::{MechanismError, MechanismPlacement, MechanismPlacementEngine};
pub use ring::{BASE_OFFSETS, HourSlot, QuarterTurns, ring_positions};
