//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use minihub_domain::entity::Entity;
use minihub_domain::event::Event;

use crate::ports::StateSink;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Acts as the hub's [`StateSink`]: every pushed snapshot becomes a
/// `StateChanged` event. Publishing succeeds even when there are no active
/// subscribers (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl StateSink for InProcessEventBus {
    fn state_changed(&self, entity: Entity) {
        tracing::trace!(entity_id = %entity.entity_id, state = %entity.state, "state changed");
        // Only fails when nobody listens.
        let _ = self.sender.send(Event::state_changed(&entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minihub_domain::entity::EntityState;
    use minihub_domain::event::EventType;

    fn leak_sensor(state: EntityState) -> Entity {
        Entity::builder()
            .entity_id("binary_sensor.basement_leak")
            .friendly_name("Basement Leak")
            .state(state)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_deliver_state_change_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();
        let entity = leak_sensor(EntityState::On);
        let id = entity.id;

        bus.state_changed(entity);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, EventType::StateChanged);
        assert_eq!(received.entity_id, Some(id));
        assert_eq!(received.data["state"], "on");
    }

    #[tokio::test]
    async fn should_deliver_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.state_changed(leak_sensor(EntityState::Off));

        assert_eq!(rx1.recv().await.unwrap().data["state"], "off");
        assert_eq!(rx2.recv().await.unwrap().data["state"], "off");
    }

    #[test]
    fn should_not_panic_without_subscribers() {
        let bus = InProcessEventBus::new(16);
        bus.state_changed(leak_sensor(EntityState::Unknown));
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessEventBus::new(16);
        bus.state_changed(leak_sensor(EntityState::Off));

        let mut rx = bus.subscribe();
        bus.state_changed(leak_sensor(EntityState::On));

        assert_eq!(rx.recv().await.unwrap().data["state"], "on");
    }
}
