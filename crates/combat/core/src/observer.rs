//! Structured diagnostics emitted by the simulation.
//!
//! The core never logs. It hands [`SimEvent`]s to an injected
//! [`SimObserver`]; the runtime forwards them to `tracing` and the event bus.
//! Board-level events (mechanisms, regeneration) are only emitted for steps
//! that commit.

use std::sync::Mutex;

use crate::engine::TransitionPhase;
use crate::mechanism::QuarterTurns;
use crate::resources::ResourceKind;
use crate::state::{MechanismId, MechanismKind, Position};
use crate::action::ActionKind;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    StepStarted {
        step: usize,
        step_id: String,
        actions: usize,
    },
    ActionRejected {
        step: usize,
        action_index: usize,
        kind: ActionKind,
        phase: TransitionPhase,
        code: String,
        message: String,
    },
    StepCommitted {
        step: usize,
        step_id: String,
        available_ap: u32,
        available_wp: u32,
        available_mp: u32,
    },
    StepAborted {
        step: usize,
        step_id: String,
        action_index: usize,
        message: String,
    },
    MechanismCreated {
        step: usize,
        id: MechanismId,
        kind: MechanismKind,
        position: Position,
    },
    MechanismSkipped {
        step: usize,
        kind: MechanismKind,
        existing: MechanismId,
    },
    DialRingPlaced {
        step: usize,
        dial: MechanismId,
        hours: usize,
        orientation: QuarterTurns,
    },
    MechanismCharged {
        step: usize,
        id: MechanismId,
        charges: u32,
    },
    ResourceRegenerated {
        step: usize,
        source: String,
        kind: ResourceKind,
        amount: u32,
    },
    Rewound {
        to: usize,
    },
    Reset,
}

/// Receives simulation events. Implementations must not block.
pub trait SimObserver: Send + Sync {
    fn on_event(&self, event: &SimEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {
    fn on_event(&self, _event: &SimEvent) {}
}

/// Keeps every event in memory; handy for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SimEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SimEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SimObserver for RecordingObserver {
    fn on_event(&self, event: &SimEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
