//! Live board contents: entities, mechanisms and dial hour markers.

use super::{DialHour, DialHourId, Entity, EntityId, Mechanism, MechanismId, MechanismKind, Position};

/// Everything standing on the board at a step boundary.
///
/// `Clone` produces a full deep copy; history snapshots rely on that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub entities: Vec<Entity>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mechanisms: Vec<Mechanism>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dial_hours: Vec<DialHour>,
    #[cfg_attr(feature = "serde", serde(default))]
    next_mechanism_id: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    next_dial_hour_id: u32,
}

impl BoardState {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            ..Self::default()
        }
    }

    // ===== entities =====

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.is_player())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.position == position)
    }

    /// Returns true if an entity or a mechanism stands on `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.entity_at(position).is_some() || self.mechanism_at(position).is_some()
    }

    // ===== mechanisms =====

    pub fn mechanism(&self, id: MechanismId) -> Option<&Mechanism> {
        self.mechanisms.iter().find(|mechanism| mechanism.id == id)
    }

    pub fn mechanism_mut(&mut self, id: MechanismId) -> Option<&mut Mechanism> {
        self.mechanisms
            .iter_mut()
            .find(|mechanism| mechanism.id == id)
    }

    pub fn mechanism_at(&self, position: Position) -> Option<&Mechanism> {
        self.mechanisms
            .iter()
            .find(|mechanism| mechanism.position == position)
    }

    /// The mechanism of `kind`, if one exists. There is never more than one.
    pub fn mechanism_of_kind(&self, kind: MechanismKind) -> Option<&Mechanism> {
        self.mechanisms
            .iter()
            .find(|mechanism| mechanism.kind == kind)
    }

    pub fn mechanisms_of_kind(&self, kind: MechanismKind) -> impl Iterator<Item = &Mechanism> {
        self.mechanisms
            .iter()
            .filter(move |mechanism| mechanism.kind == kind)
    }

    pub fn count_of_kind(&self, kind: MechanismKind) -> usize {
        self.mechanisms_of_kind(kind).count()
    }

    // Boards loaded from data may already hold mechanisms, so the counter
    // never hands out an id below the highest one in use.
    pub(crate) fn allocate_mechanism_id(&mut self) -> MechanismId {
        let floor = self
            .mechanisms
            .iter()
            .map(|mechanism| mechanism.id.0 + 1)
            .max()
            .unwrap_or(0);
        let id = MechanismId(self.next_mechanism_id.max(floor));
        self.next_mechanism_id = id.0 + 1;
        id
    }

    pub(crate) fn allocate_dial_hour_id(&mut self) -> DialHourId {
        let floor = self
            .dial_hours
            .iter()
            .map(|hour| hour.id.0 + 1)
            .max()
            .unwrap_or(0);
        let id = DialHourId(self.next_dial_hour_id.max(floor));
        self.next_dial_hour_id = id.0 + 1;
        id
    }

    // ===== dial hours =====

    pub fn dial_hours_of(&self, dial: MechanismId) -> impl Iterator<Item = &DialHour> {
        self.dial_hours.iter().filter(move |hour| hour.dial == dial)
    }

    pub fn dial_hour_at(&self, position: Position) -> Option<&DialHour> {
        self.dial_hours.iter().find(|hour| hour.position == position)
    }

    pub fn dial_hour_position(&self, dial: MechanismId, hour: u8) -> Option<Position> {
        self.dial_hours_of(dial)
            .find(|marker| marker.hour == hour)
            .map(|marker| marker.position)
    }

    pub(crate) fn remove_dial_hours_of(&mut self, dial: MechanismId) {
        self.dial_hours.retain(|hour| hour.dial != dial);
    }
}
