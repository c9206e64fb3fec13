//! Hour-marker geometry around a dial.
//!
//! The twelve markers sit on fixed integer offsets around the dial centre,
//! hour 12 straight "up" at `(0, -3)` and the rest clockwise. The ring is
//! turned in quarter steps so that hour 12 points away from the caster.

use arrayvec::ArrayVec;

use crate::config::SimConfig;
use crate::state::Position;

/// Offsets of hours 1 through 12 (index `hour - 1`) with hour 12 pointing up.
pub const BASE_OFFSETS: [(i32, i32); SimConfig::DIAL_HOURS] = [
    (1, -2),
    (2, -1),
    (3, 0),
    (2, 1),
    (1, 2),
    (0, 3),
    (-1, 2),
    (-2, 1),
    (-3, 0),
    (-2, -1),
    (-1, -2),
    (0, -3),
];

/// Number of 90° clockwise turns applied to the base ring, in `0..4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuarterTurns(u8);

impl QuarterTurns {
    pub const NONE: Self = Self(0);

    pub const fn new(turns: u8) -> Self {
        Self(turns % 4)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Picks the orientation from the caster→target vector.
    ///
    /// The horizontal axis wins only when strictly dominant; ties and the
    /// zero vector fall through to the vertical branch.
    pub const fn from_vector(dx: i32, dy: i32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0 { Self(1) } else { Self(3) }
        } else if dy > 0 {
            Self(2)
        } else {
            Self(0)
        }
    }

    pub const fn between(caster: Position, target: Position) -> Self {
        let (dx, dy) = caster.delta_to(target);
        Self::from_vector(dx, dy)
    }

    /// Applies `(x, y) -> (-y, x)` once per quarter turn.
    pub const fn rotate(self, offset: (i32, i32)) -> (i32, i32) {
        let (mut x, mut y) = offset;
        let mut turn = 0;
        while turn < self.0 {
            let previous_x = x;
            x = -y;
            y = previous_x;
            turn += 1;
        }
        (x, y)
    }

    pub const fn degrees(self) -> u16 {
        self.0 as u16 * 90
    }
}

/// A computed marker: hour number plus absolute board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u8,
    pub position: Position,
}

/// Computes the hour markers around `center`, skipping any that fall off
/// a `board_size`-sided board. Returned in hour order 1..=12.
pub fn ring_positions(
    center: Position,
    orientation: QuarterTurns,
    board_size: i32,
) -> ArrayVec<HourSlot, { SimConfig::DIAL_HOURS }> {
    let mut slots = ArrayVec::new();
    for (index, offset) in BASE_OFFSETS.iter().enumerate() {
        let (dx, dy) = orientation.rotate(*offset);
        let position = center.offset(dx, dy);
        if position.in_bounds(board_size) {
            slots.push(HourSlot {
                hour: index as u8 + 1,
                position,
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: i32 = SimConfig::DEFAULT_BOARD_SIZE;

    fn hour(slots: &[HourSlot], hour: u8) -> Option<Position> {
        slots.iter().find(|slot| slot.hour == hour).map(|slot| slot.position)
    }

    #[test]
    fn orientation_follows_dominant_axis() {
        assert_eq!(QuarterTurns::from_vector(1, 0), QuarterTurns::new(1));
        assert_eq!(QuarterTurns::from_vector(-4, 2), QuarterTurns::new(3));
        assert_eq!(QuarterTurns::from_vector(1, 3), QuarterTurns::new(2));
        assert_eq!(QuarterTurns::from_vector(0, -2), QuarterTurns::NONE);
    }

    #[test]
    fn diagonal_ties_use_vertical_axis() {
        assert_eq!(QuarterTurns::from_vector(2, 2), QuarterTurns::new(2));
        assert_eq!(QuarterTurns::from_vector(-2, -2), QuarterTurns::NONE);
        assert_eq!(QuarterTurns::from_vector(0, 0), QuarterTurns::NONE);
    }

    #[test]
    fn one_quarter_turn_moves_twelve_to_the_right() {
        let turns = QuarterTurns::between(Position::new(6, 6), Position::new(7, 6));
        assert_eq!(turns, QuarterTurns::new(1));
        assert_eq!(turns.rotate((0, -3)), (3, 0));

        let slots = ring_positions(Position::new(6, 6), turns, BOARD);
        assert_eq!(hour(&slots, 12), Some(Position::new(9, 6)));
        assert_eq!(hour(&slots, 6), Some(Position::new(3, 6)));
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for offset in BASE_OFFSETS {
            assert_eq!(QuarterTurns(4).rotate(offset), offset);
            assert_eq!(QuarterTurns::new(4).rotate(offset), offset);
        }
    }

    #[test]
    fn centred_ring_is_complete_and_unrotated() {
        let slots = ring_positions(Position::new(6, 6), QuarterTurns::NONE, BOARD);
        assert_eq!(slots.len(), 12);
        assert_eq!(hour(&slots, 12), Some(Position::new(6, 3)));
        assert_eq!(hour(&slots, 3), Some(Position::new(9, 6)));
        let hours: Vec<u8> = slots.iter().map(|slot| slot.hour).collect();
        assert_eq!(hours, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn markers_off_the_board_are_skipped() {
        let slots = ring_positions(Position::new(0, 0), QuarterTurns::NONE, BOARD);
        assert!(slots.len() < 12);
        // Only hours 3..=6 (east and south quadrant) stay on the board.
        let hours: Vec<u8> = slots.iter().map(|slot| slot.hour).collect();
        assert_eq!(hours, vec![3, 4, 5, 6]);
    }

    #[test]
    fn every_marker_is_in_bounds_for_any_centre_and_orientation() {
        for x in 0..BOARD {
            for y in 0..BOARD {
                for turns in 0..4 {
                    let slots =
                        ring_positions(Position::new(x, y), QuarterTurns::new(turns), BOARD);
                    assert!(slots.len() <= 12);
                    for slot in &slots {
                        assert!(slot.position.in_bounds(BOARD));
                        assert!((1..=12).contains(&slot.hour));
                    }
                }
            }
        }
    }
}
