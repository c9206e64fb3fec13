//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use combat_core::SimEvent;

use super::types::{NavigationEvent, RunEvent, StepEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Step results (committed and failed)
    Step,
    /// Rewind and reset
    Navigation,
    /// Full-run lifecycle
    Run,
    /// Fine-grained diagnostics from the simulation core
    Simulation,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Step, Topic::Navigation, Topic::Run, Topic::Simulation];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Step(StepEvent),
    Navigation(NavigationEvent),
    Run(RunEvent),
    Simulation(SimEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Step(_) => Topic::Step,
            Event::Navigation(_) => Topic::Navigation,
            Event::Run(_) => Topic::Run,
            Event::Simulation(_) => Topic::Simulation,
        }
    }
}

/// One broadcast sender per topic, created up front.
struct TopicChannels {
    step: broadcast::Sender<Event>,
    navigation: broadcast::Sender<Event>,
    run: broadcast::Sender<Event>,
    simulation: broadcast::Sender<Event>,
}

impl TopicChannels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Step => &self.step,
            Topic::Navigation => &self.navigation,
            Topic::Run => &self.run,
            Topic::Simulation => &self.simulation,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscribers are dropped.
pub struct EventBus {
    channels: Arc<TopicChannels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = TopicChannels {
            step: broadcast::channel(capacity).0,
            navigation: broadcast::channel(capacity).0,
            run: broadcast::channel(capacity).0,
            simulation: broadcast::channel(capacity).0,
        };

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels.sender(topic).receiver_count()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut navigation = bus.subscribe(Topic::Navigation);
        let mut run = bus.subscribe(Topic::Run);

        bus.publish(Event::Navigation(NavigationEvent::Rewound { to: 2 }));

        let event = navigation.recv().await.expect("navigation event");
        assert!(matches!(
            event,
            Event::Navigation(NavigationEvent::Rewound { to: 2 })
        ));
        assert!(run.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Navigation(NavigationEvent::Reset));
        assert_eq!(bus.subscriber_count(Topic::Navigation), 0);
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let _rx = clone.subscribe_multiple(&Topic::ALL);
        for topic in Topic::ALL {
            assert_eq!(bus.subscriber_count(topic), 1);
        }
    }
}
