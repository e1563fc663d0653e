//! Event: an immutable record of something that happened.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Timestamp};
use crate::id::{EntityId, EventId};

/// What kind of thing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    StateChanged,
}

/// An immutable record pushed to the hub's event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub entity_id: Option<EntityId>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    #[must_use]
    pub fn new(
        event_type: EventType,
        entity_id: Option<EntityId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            entity_id,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Record the fresh snapshot of an entity whose state was recomputed.
    #[must_use]
    pub fn state_changed(entity: &Entity) -> Self {
        Self::new(
            EventType::StateChanged,
            Some(entity.id),
            serde_json::json!({
                "entity_id": entity.entity_id,
                "state": entity.state,
                "attributes": entity.attributes,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityState;

    #[test]
    fn should_embed_entity_snapshot_in_state_changed_event() {
        let entity = Entity::builder()
            .entity_id("binary_sensor.back_door")
            .friendly_name("Back Door")
            .state(EntityState::On)
            .attribute("device_class", "opening")
            .build()
            .unwrap();

        let event = Event::state_changed(&entity);

        assert_eq!(event.event_type, EventType::StateChanged);
        assert_eq!(event.entity_id, Some(entity.id));
        assert_eq!(event.data["entity_id"], "binary_sensor.back_door");
        assert_eq!(event.data["state"], "on");
        assert_eq!(event.data["attributes"]["device_class"], "opening");
    }
}
