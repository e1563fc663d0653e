//! Integration port: lifecycle and service-call handling for device integrations.
//!
//! An integration bridges an external system (a home-automation controller,
//! a radio protocol, …) into the minihub system. It discovers devices/entities
//! on setup and answers service calls directed at entities it owns.

use std::future::Future;

use minihub_domain::device::Device;
use minihub_domain::entity::Entity;
use minihub_domain::error::MiniHubError;
use minihub_domain::id::EntityId;

/// Context provided to integrations for persisting discoveries.
///
/// This is a **port**: adapters call it to persist devices and entities
/// they discover. The hub provides the concrete implementation.
pub trait IntegrationContext: Send + Sync {
    /// Persist a discovered device (create or update by id).
    fn upsert_device(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, MiniHubError>> + Send;

    /// Persist a discovered entity (create or update by id).
    fn upsert_entity(
        &self,
        entity: Entity,
    ) -> impl Future<Output = Result<Entity, MiniHubError>> + Send;

    /// Convenience: persist a full [`DiscoveredDevice`] (device + all entities).
    fn persist_discovered(
        &self,
        dd: DiscoveredDevice,
    ) -> impl Future<Output = Result<(), MiniHubError>> + Send {
        async move {
            self.upsert_device(dd.device).await?;
            for entity in dd.entities {
                self.upsert_entity(entity).await?;
            }
            Ok(())
        }
    }
}

/// A pluggable device integration.
///
/// The hub calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): discover, persist and attach entities
/// 2. (the hub runs, forwarding service calls to
///    [`handle_service_call`](Self::handle_service_call))
/// 3. [`teardown`](Self::teardown): release timers and subscriptions
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"isy994"`).
    fn name(&self) -> &'static str;

    /// Discover devices and persist them via `ctx`.
    fn setup(
        &mut self,
        ctx: &impl IntegrationContext,
    ) -> impl Future<Output = Result<(), MiniHubError>> + Send;

    /// Handle a service call for an entity owned by this integration.
    ///
    /// Returns the entity state after handling the call.
    fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
    ) -> impl Future<Output = Result<Entity, MiniHubError>> + Send;

    /// Called on graceful shutdown.
    fn teardown(&mut self) -> impl Future<Output = Result<(), MiniHubError>> + Send;
}

/// A device and its associated entities discovered during integration setup.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub device: Device,
    pub entities: Vec<Entity>,
}
