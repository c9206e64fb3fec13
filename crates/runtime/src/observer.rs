//! [`SimObserver`] implementations wiring core diagnostics into the runtime.
//!
//! The worker composes a [`FanoutObserver`] of a [`TracingObserver`] and a
//! [`BusObserver`], plus any observer supplied through the builder.
use std::sync::Arc;

use combat_core::{SimEvent, SimObserver};
use tracing::{debug, info, warn};

use crate::events::{Event, EventBus};

/// Logs every simulation event through `tracing`.
///
/// Commits land at INFO, rejections and aborts at WARN, board-level detail
/// at DEBUG.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn on_event(&self, event: &SimEvent) {
        match event {
            SimEvent::StepStarted {
                step,
                step_id,
                actions,
            } => debug!(step, step_id = %step_id, actions, "step started"),
            SimEvent::ActionRejected {
                step,
                action_index,
                kind,
                phase,
                code,
                message,
            } => warn!(
                step,
                action_index,
                kind = ?kind,
                phase = phase.as_str(),
                code = %code,
                "action rejected: {}",
                message
            ),
            SimEvent::StepCommitted {
                step,
                step_id,
                available_ap,
                available_wp,
                available_mp,
            } => info!(
                step,
                step_id = %step_id,
                ap = available_ap,
                wp = available_wp,
                mp = available_mp,
                "step committed"
            ),
            SimEvent::StepAborted {
                step,
                step_id,
                action_index,
                message,
            } => warn!(
                step,
                step_id = %step_id,
                action_index,
                "step aborted: {}",
                message
            ),
            SimEvent::MechanismCreated {
                step,
                id,
                kind,
                position,
            } => debug!(step, id = id.0, kind = ?kind, position = ?position, "mechanism created"),
            SimEvent::MechanismSkipped {
                step,
                kind,
                existing,
            } => debug!(step, kind = ?kind, existing = existing.0, "mechanism already present"),
            SimEvent::DialRingPlaced {
                step,
                dial,
                hours,
                orientation,
            } => debug!(
                step,
                dial = dial.0,
                hours,
                orientation = ?orientation,
                "dial ring placed"
            ),
            SimEvent::MechanismCharged { step, id, charges } => {
                debug!(step, id = id.0, charges, "mechanism charged")
            }
            SimEvent::ResourceRegenerated {
                step,
                source,
                kind,
                amount,
            } => debug!(step, source = %source, kind = ?kind, amount, "resource regenerated"),
            SimEvent::Rewound { to } => info!(to, "timeline rewound"),
            SimEvent::Reset => info!("timeline reset"),
        }
    }
}

/// Republishes simulation events on [`crate::Topic::Simulation`].
#[derive(Clone)]
pub struct BusObserver {
    bus: EventBus,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl SimObserver for BusObserver {
    fn on_event(&self, event: &SimEvent) {
        self.bus.publish(Event::Simulation(event.clone()));
    }
}

/// Forwards each event to every inner observer, in insertion order.
#[derive(Clone, Default)]
pub struct FanoutObserver {
    observers: Vec<Arc<dyn SimObserver>>,
}

impl FanoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn push(&mut self, observer: Arc<dyn SimObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl SimObserver for FanoutObserver {
    fn on_event(&self, event: &SimEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Topic;
    use combat_core::RecordingObserver;

    #[test]
    fn fanout_reaches_every_observer() {
        let first = Arc::new(RecordingObserver::new());
        let second = Arc::new(RecordingObserver::new());
        let fanout = FanoutObserver::new()
            .with(first.clone())
            .with(Arc::new(TracingObserver))
            .with(second.clone());

        fanout.on_event(&SimEvent::Reset);
        fanout.on_event(&SimEvent::Rewound { to: 1 });

        assert_eq!(fanout.len(), 3);
        assert_eq!(first.events(), second.events());
        assert_eq!(first.events().len(), 2);
    }

    #[tokio::test]
    async fn bus_observer_publishes_on_simulation_topic() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Simulation);
        let observer = BusObserver::new(bus);

        observer.on_event(&SimEvent::Rewound { to: 3 });

        match rx.recv().await.expect("simulation event") {
            Event::Simulation(SimEvent::Rewound { to }) => assert_eq!(to, 3),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
