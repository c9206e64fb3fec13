//! Mechanism creation and bookkeeping over a borrowed [`BoardState`].

use super::ring::{QuarterTurns, ring_positions};
use crate::config::SimConfig;
use crate::env::SpellOracle;
use crate::error::{ErrorSeverity, SimError};
use crate::state::{BoardState, DialHour, Mechanism, MechanismId, MechanismKind, Position};

/// What a mechanism-producing cast did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MechanismPlacement {
    /// The spell does not produce a mechanism.
    NotMechanism,
    Created {
        id: MechanismId,
        kind: MechanismKind,
        /// Hour markers placed alongside a dial; zero for other kinds.
        hours: usize,
    },
    /// A mechanism of this kind is already on the board; nothing changed.
    AlreadyPresent {
        kind: MechanismKind,
        existing: MechanismId,
    },
}

impl MechanismPlacement {
    pub const fn created(&self) -> Option<MechanismId> {
        match self {
            Self::Created { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MechanismError {
    #[error("mechanism {0} not found")]
    NotFound(MechanismId),

    #[error("mechanism {id} holds {available} charges, {required} required")]
    NotEnoughCharges {
        id: MechanismId,
        required: u32,
        available: u32,
    },
}

impl SimError for MechanismError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Internal,
            Self::NotEnoughCharges { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "MECHANISM_NOT_FOUND",
            Self::NotEnoughCharges { .. } => "MECHANISM_NOT_ENOUGH_CHARGES",
        }
    }
}

/// Creates mechanisms and keeps their dial rings and charges consistent.
///
/// Creation is idempotent per kind: if a mechanism of the requested kind is
/// already on the board the call is a no-op, whichever code path asked.
pub struct MechanismPlacementEngine<'a> {
    board: &'a mut BoardState,
    board_size: i32,
}

impl<'a> MechanismPlacementEngine<'a> {
    pub fn new(board: &'a mut BoardState, config: &SimConfig) -> Self {
        Self {
            board,
            board_size: config.board_size,
        }
    }

    /// Resolves `spell_id` through the catalog and creates its mechanism.
    ///
    /// Returns the new mechanism, or `None` when the spell does not produce
    /// one or one of that kind already exists.
    pub fn try_create(
        &mut self,
        spells: &dyn SpellOracle,
        spell_id: &str,
        target: Position,
        caster: Position,
        step: usize,
    ) -> Option<Mechanism> {
        let kind = spells.mechanism_kind(spell_id);
        let id = self.place(kind, spell_id, target, caster, step).created()?;
        self.board.mechanism(id).cloned()
    }

    /// Creates a mechanism of `kind` (if any) at `target`.
    pub fn place(
        &mut self,
        kind: Option<MechanismKind>,
        spell_id: &str,
        target: Position,
        caster: Position,
        step: usize,
    ) -> MechanismPlacement {
        let Some(kind) = kind else {
            return MechanismPlacement::NotMechanism;
        };

        if let Some(existing) = self.board.mechanism_of_kind(kind) {
            return MechanismPlacement::AlreadyPresent {
                kind,
                existing: existing.id,
            };
        }

        let orientation = (kind == MechanismKind::Dial).then(|| QuarterTurns::between(caster, target));
        let id = self.board.allocate_mechanism_id();
        self.board.mechanisms.push(Mechanism {
            id,
            kind,
            position: target,
            charges: 0,
            created_step: step,
            spell_id: spell_id.to_string(),
            orientation,
        });

        let hours = match orientation {
            Some(orientation) => self.place_ring(id, target, orientation),
            None => 0,
        };

        MechanismPlacement::Created { id, kind, hours }
    }

    fn place_ring(&mut self, dial: MechanismId, center: Position, orientation: QuarterTurns) -> usize {
        let slots = ring_positions(center, orientation, self.board_size);
        for slot in &slots {
            let id = self.board.allocate_dial_hour_id();
            self.board.dial_hours.push(DialHour {
                id,
                dial,
                hour: slot.hour,
                position: slot.position,
            });
        }
        slots.len()
    }

    /// Moves a mechanism. A dial's hour markers are translated by the same
    /// offset; markers that land off the board are dropped and never come
    /// back.
    pub fn relocate(&mut self, id: MechanismId, position: Position) -> Result<(), MechanismError> {
        let mechanism = self
            .board
            .mechanism_mut(id)
            .ok_or(MechanismError::NotFound(id))?;
        let from = mechanism.position;
        mechanism.position = position;

        let (dx, dy) = from.delta_to(position);
        let board_size = self.board_size;
        for hour in self.board.dial_hours.iter_mut().filter(|hour| hour.dial == id) {
            hour.position = hour.position.offset(dx, dy);
        }
        self.board
            .dial_hours
            .retain(|hour| hour.dial != id || hour.position.in_bounds(board_size));
        Ok(())
    }

    /// Adds charges up to the kind's cap. Returns the new charge count.
    pub fn add_charges(&mut self, id: MechanismId, amount: u32) -> Result<u32, MechanismError> {
        let mechanism = self
            .board
            .mechanism_mut(id)
            .ok_or(MechanismError::NotFound(id))?;
        let cap = mechanism.kind.max_charges();
        mechanism.charges = mechanism.charges.saturating_add(amount).min(cap);
        Ok(mechanism.charges)
    }

    /// Removes `amount` charges. Returns the remaining count.
    pub fn consume_charges(&mut self, id: MechanismId, amount: u32) -> Result<u32, MechanismError> {
        let mechanism = self
            .board
            .mechanism_mut(id)
            .ok_or(MechanismError::NotFound(id))?;
        if mechanism.charges < amount {
            return Err(MechanismError::NotEnoughCharges {
                id,
                required: amount,
                available: mechanism.charges,
            });
        }
        mechanism.charges -= amount;
        Ok(mechanism.charges)
    }

    /// Removes a mechanism and any hour markers it owns.
    pub fn destroy(&mut self, id: MechanismId) -> Result<Mechanism, MechanismError> {
        let index = self
            .board
            .mechanisms
            .iter()
            .position(|mechanism| mechanism.id == id)
            .ok_or(MechanismError::NotFound(id))?;
        let removed = self.board.mechanisms.remove(index);
        self.board.remove_dial_hours_of(id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::SpellProfile;

    struct Catalog(HashMap<String, SpellProfile>);

    impl Catalog {
        fn xelor() -> Self {
            let spells = [
                SpellProfile::new("XEL_DIAL", 2, 1).with_mechanism(MechanismKind::Dial),
                SpellProfile::new("XEL_COG", 2, 0).with_mechanism(MechanismKind::Gear),
                SpellProfile::new("XEL_HAND", 3, 0).with_damage(30),
            ];
            Self(spells.into_iter().map(|s| (s.id.clone(), s)).collect())
        }
    }

    impl SpellOracle for Catalog {
        fn spell(&self, spell_id: &str) -> Option<&SpellProfile> {
            self.0.get(spell_id)
        }
    }

    fn engine(board: &mut BoardState) -> MechanismPlacementEngine<'_> {
        MechanismPlacementEngine::new(board, &SimConfig::default())
    }

    #[test]
    fn dial_creates_oriented_ring() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();

        let dial = engine(&mut board)
            .try_create(&catalog, "XEL_DIAL", Position::new(7, 6), Position::new(6, 6), 0)
            .unwrap();

        assert_eq!(dial.kind, MechanismKind::Dial);
        assert_eq!(dial.charges, 0);
        assert_eq!(dial.orientation, Some(QuarterTurns::new(1)));
        assert_eq!(board.dial_hours.len(), 12);
        assert_eq!(
            board.dial_hour_position(dial.id, 12),
            Some(Position::new(10, 6))
        );
    }

    #[test]
    fn second_creation_of_same_kind_is_a_no_op() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let caster = Position::new(6, 10);

        let first = engine(&mut board).try_create(&catalog, "XEL_DIAL", Position::new(6, 6), caster, 0);
        let second = engine(&mut board).place(
            Some(MechanismKind::Dial),
            "XEL_DIAL",
            Position::new(2, 2),
            caster,
            1,
        );

        let first = first.unwrap();
        assert_eq!(
            second,
            MechanismPlacement::AlreadyPresent {
                kind: MechanismKind::Dial,
                existing: first.id,
            }
        );
        assert_eq!(board.count_of_kind(MechanismKind::Dial), 1);
        assert_eq!(board.dial_hours_of(first.id).count(), 12);
    }

    #[test]
    fn non_mechanism_and_unknown_spells_do_nothing() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let origin = Position::new(6, 6);

        assert!(engine(&mut board).try_create(&catalog, "XEL_HAND", origin, origin, 0).is_none());
        assert!(engine(&mut board).try_create(&catalog, "NOPE", origin, origin, 0).is_none());
        assert!(board.mechanisms.is_empty());
    }

    #[test]
    fn dial_near_edge_has_partial_ring() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();

        let dial = engine(&mut board)
            .try_create(&catalog, "XEL_DIAL", Position::new(0, 0), Position::new(0, 5), 0)
            .unwrap();

        let count = board.dial_hours_of(dial.id).count();
        assert!(count > 0 && count < 12);
        assert!(board.dial_hours.iter().all(|h| h.position.in_bounds(13)));
    }

    #[test]
    fn charges_are_capped_and_consumed() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let origin = Position::new(6, 6);
        let cog = engine(&mut board)
            .try_create(&catalog, "XEL_COG", Position::new(4, 4), origin, 0)
            .unwrap();

        let mut mechanisms = engine(&mut board);
        assert_eq!(mechanisms.add_charges(cog.id, 2), Ok(2));
        assert_eq!(mechanisms.add_charges(cog.id, 5), Ok(3));
        assert_eq!(mechanisms.consume_charges(cog.id, 2), Ok(1));
        assert_eq!(
            mechanisms.consume_charges(cog.id, 2),
            Err(MechanismError::NotEnoughCharges {
                id: cog.id,
                required: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn relocating_a_dial_translates_its_markers() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let dial = engine(&mut board)
            .try_create(&catalog, "XEL_DIAL", Position::new(6, 6), Position::new(6, 9), 0)
            .unwrap();
        assert_eq!(board.dial_hour_position(dial.id, 12), Some(Position::new(6, 3)));

        engine(&mut board).relocate(dial.id, Position::new(6, 1)).unwrap();

        assert_eq!(board.mechanism(dial.id).map(|m| m.position), Some(Position::new(6, 1)));
        assert_eq!(board.dial_hour_position(dial.id, 12), None);
        assert_eq!(board.dial_hour_position(dial.id, 6), Some(Position::new(6, 4)));
        assert!(board.dial_hours.iter().all(|h| h.position.in_bounds(13)));
    }

    #[test]
    fn clipped_markers_stay_gone_after_relocation() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let dial = engine(&mut board)
            .try_create(&catalog, "XEL_DIAL", Position::new(6, 1), Position::new(6, 4), 0)
            .unwrap();
        let clipped: Vec<u8> = board.dial_hours_of(dial.id).map(|h| h.hour).collect();
        assert!(clipped.len() < 12);

        engine(&mut board).relocate(dial.id, Position::new(6, 6)).unwrap();

        let moved: Vec<u8> = board.dial_hours_of(dial.id).map(|h| h.hour).collect();
        assert_eq!(moved, clipped);
        assert_eq!(board.dial_hour_position(dial.id, 12), None);
        assert_eq!(board.dial_hour_position(dial.id, 6), Some(Position::new(6, 9)));
    }

    #[test]
    fn destroy_removes_mechanism_and_markers() {
        let mut board = BoardState::default();
        let catalog = Catalog::xelor();
        let origin = Position::new(6, 9);
        let dial = engine(&mut board)
            .try_create(&catalog, "XEL_DIAL", Position::new(6, 6), origin, 0)
            .unwrap();

        let removed = engine(&mut board).destroy(dial.id).unwrap();

        assert_eq!(removed.id, dial.id);
        assert!(board.mechanisms.is_empty());
        assert!(board.dial_hours.is_empty());
        assert_eq!(
            engine(&mut board).destroy(dial.id),
            Err(MechanismError::NotFound(dial.id))
        );
    }
}
