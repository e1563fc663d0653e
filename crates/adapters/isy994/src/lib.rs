//! # minihub-adapter-isy994
//!
//! Integration that exposes an ISY994 controller's sensor nodes and
//! programs as minihub binary sensors.
//!
//! The controller library owns the connection, the node objects, and their
//! event streams; this adapter only maps control events onto an
//! on/off/unknown state.
//!
//! ## Provided entities
//!
//! | Source | Entity | Device class |
//! |--------|--------|--------------|
//! | Top-level sensor node | `binary_sensor.<name>` | moisture, opening, motion or none |
//! | Subnode 4 of a leak/door sensor | `binary_sensor.<name>` | battery (on = missed heartbeat) |
//! | Other subnode of a non leak/door sensor | `binary_sensor.<name>` | from its device type |
//! | Program in the binary-sensor folder | `binary_sensor.<name>` | none |
//!
//! Subnode 2 of a leak/door sensor is not an entity of its own: it feeds the
//! parent's "off" events.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `minihub-app` and `minihub-domain`.

mod config;
pub mod controller;
pub mod device_type;
mod error;
pub mod heartbeat;
mod identity;
pub mod platform;
pub mod program;
pub mod sensor;
#[cfg(test)]
mod test_support;

pub use config::Isy994Config;
pub use error::IsyError;

use std::collections::HashMap;

use minihub_app::ports::{
    BinarySensor, DiscoveredDevice, EntityContext, Integration, IntegrationContext,
};
use minihub_domain::entity::Entity;
use minihub_domain::error::{MiniHubError, NotFoundError};
use minihub_domain::id::EntityId;

use controller::ControllerSnapshot;
use platform::IsySensor;

/// ISY994 binary-sensor integration.
pub struct Isy994Integration {
    config: Isy994Config,
    controller: ControllerSnapshot,
    entity_ctx: EntityContext,
    sensors: HashMap<EntityId, IsySensor>,
}

impl Isy994Integration {
    /// Create the integration over an already connected controller.
    ///
    /// `entity_ctx` is handed to every sensor once it is attached: state
    /// changes are pushed to its sink and heartbeat timers run on its
    /// scheduler.
    #[must_use]
    pub fn new(
        config: Isy994Config,
        controller: ControllerSnapshot,
        entity_ctx: EntityContext,
    ) -> Self {
        Self {
            config,
            controller,
            entity_ctx,
            sensors: HashMap::new(),
        }
    }

    /// Check whether this integration owns the given entity.
    #[must_use]
    pub fn owns_entity(&self, entity_id: EntityId) -> bool {
        self.sensors.contains_key(&entity_id)
    }

    #[must_use]
    pub fn sensor(&self, entity_id: EntityId) -> Option<&dyn BinarySensor> {
        self.sensors.get(&entity_id).map(IsySensor::as_binary_sensor)
    }
}

impl Integration for Isy994Integration {
    fn name(&self) -> &'static str {
        "isy994"
    }

    async fn setup(&mut self, ctx: &impl IntegrationContext) -> Result<(), MiniHubError> {
        let set = platform::build_sensors(
            &self.config,
            self.controller.connection,
            &self.controller.nodes,
            self.controller.programs_in(&self.config.program_folder),
        )?;

        let mut discovered = Vec::with_capacity(set.devices.len());
        for device in set.devices {
            let entities = set
                .sensors
                .iter()
                .map(IsySensor::as_binary_sensor)
                .filter(|sensor| sensor.device_id() == Some(device.id))
                .map(BinarySensor::snapshot)
                .collect::<Result<Vec<_>, _>>()?;
            discovered.push(DiscoveredDevice { device, entities });
        }
        for dd in discovered {
            ctx.persist_discovered(dd).await?;
        }

        for sensor in set.sensors {
            let binary = sensor.as_binary_sensor();
            binary.added_to_hub(&self.entity_ctx);
            self.sensors.insert(binary.id(), sensor);
        }

        tracing::info!(count = self.sensors.len(), "ISY994 integration ready");
        Ok(())
    }

    async fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
    ) -> Result<Entity, MiniHubError> {
        let sensor = self.sensor(entity_id).ok_or_else(|| NotFoundError {
            entity: "Entity",
            id: entity_id.to_string(),
        })?;
        tracing::debug!(entity_id = sensor.entity_id(), service, "binary sensors are read-only");
        sensor.snapshot()
    }

    async fn teardown(&mut self) -> Result<(), MiniHubError> {
        for sensor in self.sensors.values() {
            sensor.as_binary_sensor().removed_from_hub();
        }
        self.sensors.clear();
        tracing::info!("ISY994 integration stopped");
        Ok(())
    }
}
