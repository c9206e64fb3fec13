//! Append-only log of resource gains, grouped by source.

use std::collections::BTreeMap;

use super::ResourceKind;

/// Well-known regeneration sources.
pub mod sources {
    /// +1 WP per regulator on the board when a step completes.
    pub const REGULATOR: &str = "regulator";

    /// Prefix for grants declared on a spell; the spell id follows the colon.
    pub const SPELL_PREFIX: &str = "spell:";

    pub fn spell(spell_id: &str) -> String {
        format!("{SPELL_PREFIX}{spell_id}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenerationEvent {
    /// Step index during which the gain happened.
    pub step: usize,
    pub source: String,
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Per-kind totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceTotals {
    pub ap: u32,
    pub wp: u32,
    pub mp: u32,
}

impl ResourceTotals {
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = match kind {
            ResourceKind::Ap => &mut self.ap,
            ResourceKind::Wp => &mut self.wp,
            ResourceKind::Mp => &mut self.mp,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Ap => self.ap,
            ResourceKind::Wp => self.wp,
            ResourceKind::Mp => self.mp,
        }
    }
}

/// Aggregate view over the tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenerationSummary {
    pub total_ap: u32,
    pub total_wp: u32,
    pub total_mp: u32,
    pub by_source: BTreeMap<String, ResourceTotals>,
}

/// Records every regeneration for the current session.
///
/// Events are tagged with their step index so a rewind can drop the gains of
/// the steps it undoes. `clear` wipes the whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegenerationTracker {
    events: Vec<RegenerationEvent>,
}

impl RegenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: RegenerationEvent) {
        self.events.push(event);
    }

    /// Appends events staged elsewhere (e.g. by a step that just committed).
    pub fn extend(&mut self, events: impl IntoIterator<Item = RegenerationEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[RegenerationEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RegenerationEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drops every event recorded at step `step` or later.
    pub fn truncate_from_step(&mut self, step: usize) {
        self.events.retain(|event| event.step < step);
    }

    pub fn summary(&self) -> RegenerationSummary {
        let mut summary = RegenerationSummary::default();
        for event in &self.events {
            match event.kind {
                ResourceKind::Ap => summary.total_ap += event.amount,
                ResourceKind::Wp => summary.total_wp += event.amount,
                ResourceKind::Mp => summary.total_mp += event.amount,
            }
            summary
                .by_source
                .entry(event.source.clone())
                .or_default()
                .add(event.kind, event.amount);
        }
        summary
    }
}
