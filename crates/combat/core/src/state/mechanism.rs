use std::fmt;

use super::Position;
use crate::config::SimConfig;
use crate::mechanism::QuarterTurns;

/// Unique identifier for a mechanism placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MechanismId(pub u32);

impl fmt::Display for MechanismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Kinds of persistent board objects created by spells.
///
/// At most one mechanism of each kind exists on the board at a time.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MechanismKind {
    /// Accumulates charges when swapped with.
    #[strum(to_string = "gear", serialize = "cog")]
    #[cfg_attr(feature = "serde", serde(alias = "cog"))]
    Gear,
    /// Anchors a ring of twelve hour markers.
    Dial,
    /// Accumulates charges when swapped with.
    Sinistro,
    /// Must sit on a dial hour; grants WP at the end of each step.
    Regulator,
}

impl MechanismKind {
    /// Maximum charges this kind can hold. Zero means the kind never charges.
    pub const fn max_charges(self) -> u32 {
        match self {
            Self::Gear | Self::Sinistro => SimConfig::MAX_MECHANISM_CHARGES,
            Self::Dial | Self::Regulator => 0,
        }
    }

    pub const fn accumulates_charges(self) -> bool {
        self.max_charges() > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mechanism {
    pub id: MechanismId,
    pub kind: MechanismKind,
    pub position: Position,
    pub charges: u32,
    /// Step index during which the mechanism was created.
    pub created_step: usize,
    /// Spell that produced this mechanism.
    pub spell_id: String,
    /// Ring orientation. Only dials carry one.
    pub orientation: Option<QuarterTurns>,
}

/// Unique identifier for a dial hour marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DialHourId(pub u32);

/// One marker of the ring surrounding a dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialHour {
    pub id: DialHourId,
    pub dial: MechanismId,
    /// Hour number in `1..=12`.
    pub hour: u8,
    pub position: Position,
}
