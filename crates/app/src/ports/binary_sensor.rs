//! Binary sensor port: the capability interface every on/off/unknown
//! entity exposes to the hub.
//!
//! Integrations compose their sensors from this trait rather than from a
//! shared base type: the hub only ever reads state through the accessors and
//! hands over an [`EntityContext`] once the entity is attached.

use std::collections::HashMap;
use std::sync::Arc;

use minihub_domain::entity::{AttributeValue, DeviceClass, Entity, EntityState};
use minihub_domain::error::MiniHubError;
use minihub_domain::id::{DeviceId, EntityId};

use super::scheduler::Scheduler;
use super::state_sink::StateSink;

/// Hub services handed to an entity when it is attached.
#[derive(Clone)]
pub struct EntityContext {
    sink: Arc<dyn StateSink>,
    scheduler: Arc<dyn Scheduler>,
}

impl EntityContext {
    pub fn new(sink: Arc<dyn StateSink>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self { sink, scheduler }
    }

    #[must_use]
    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    /// Push the sensor's current snapshot to the hub.
    ///
    /// A sensor whose snapshot fails validation is logged and skipped.
    pub fn publish<S: BinarySensor + ?Sized>(&self, sensor: &S) {
        match sensor.snapshot() {
            Ok(entity) => self.sink.state_changed(entity),
            Err(error) => tracing::warn!(
                entity_id = sensor.entity_id(),
                %error,
                "unable to publish entity snapshot"
            ),
        }
    }
}

impl std::fmt::Debug for EntityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityContext").finish_non_exhaustive()
    }
}

/// An entity whose state is on, off, or unknown.
pub trait BinarySensor: Send + Sync {
    fn id(&self) -> EntityId;

    fn device_id(&self) -> Option<DeviceId>;

    /// `<domain>.<object_id>` identifier, e.g. `binary_sensor.front_door`.
    fn entity_id(&self) -> &str;

    fn friendly_name(&self) -> &str;

    /// `false` whenever the state is unknown.
    fn is_on(&self) -> bool;

    fn state(&self) -> EntityState;

    fn device_class(&self) -> Option<DeviceClass>;

    fn extra_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::new()
    }

    /// Called once the hub tracks the entity; start listening for updates here.
    fn added_to_hub(&self, ctx: &EntityContext);

    /// Called when the hub stops tracking the entity.
    fn removed_from_hub(&self) {}

    /// Build the hub-facing [`Entity`] for the current state.
    ///
    /// # Errors
    ///
    /// Returns [`MiniHubError::Validation`] if the identity is malformed.
    fn snapshot(&self) -> Result<Entity, MiniHubError> {
        let mut builder = Entity::builder()
            .id(self.id())
            .entity_id(self.entity_id())
            .friendly_name(self.friendly_name())
            .state(self.state())
            .attributes(self.extra_attributes());
        if let Some(device_id) = self.device_id() {
            builder = builder.device_id(device_id);
        }
        if let Some(class) = self.device_class() {
            builder = builder.attribute("device_class", class.as_str());
        }
        builder.build()
    }
}
