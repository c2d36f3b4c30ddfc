//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{AcquisitionEvent, SessionEvent, WaitEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Bank and marketplace sessions opening and closing
    Session,
    /// Purchases, withdrawals, deposits
    Acquisition,
    /// Wait timeouts
    Wait,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Session(SessionEvent),
    Acquisition(AcquisitionEvent),
    WaitTimedOut(WaitEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Acquisition(_) => Topic::Acquisition,
            Event::WaitTimedOut(_) => Topic::Wait,
        }
    }
}

struct Channels {
    session: broadcast::Sender<Event>,
    acquisition: broadcast::Sender<Event>,
    wait: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Session => &self.session,
            Topic::Acquisition => &self.acquisition,
            Topic::Wait => &self.wait,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                session: broadcast::channel(capacity).0,
                acquisition: broadcast::channel(capacity).0,
                wait: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
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
    use world_core::{ItemId, Tick};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut subs = bus.subscribe_multiple(&[Topic::Acquisition, Topic::Wait]);

        bus.publish(Event::Acquisition(AcquisitionEvent::Deposited { tick: Tick(3) }));

        let acquisition = subs.get_mut(&Topic::Acquisition).map(|rx| rx.try_recv());
        assert!(matches!(
            acquisition,
            Some(Ok(Event::Acquisition(AcquisitionEvent::Deposited { .. })))
        ));
        let wait = subs.get_mut(&Topic::Wait).map(|rx| rx.try_recv().is_err());
        assert_eq!(wait, Some(true));
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Acquisition(AcquisitionEvent::Purchased {
            item: ItemId(1),
            quantity: 1,
            tick: Tick(0),
        }));
    }
}
