//! Program-backed binary sensor: mirrors a controller program's status flag.

use minihub_app::ports::{BinarySensor, EntityContext};
use minihub_domain::entity::{DeviceClass, EntityState};
use minihub_domain::id::{DeviceId, EntityId};

use crate::identity::SensorIdentity;

/// Read-only passthrough of a program's boolean status.
#[derive(Debug, Clone)]
pub struct ProgramSensor {
    identity: SensorIdentity,
    status: bool,
}

impl ProgramSensor {
    pub fn new(address: &str, name: &str, status: bool) -> Self {
        Self::with_identity(SensorIdentity::for_program(address, name), status)
    }

    pub(crate) fn with_identity(identity: SensorIdentity, status: bool) -> Self {
        Self { identity, status }
    }
}

impl BinarySensor for ProgramSensor {
    fn id(&self) -> EntityId {
        self.identity.id
    }

    fn device_id(&self) -> Option<DeviceId> {
        Some(self.identity.device_id)
    }

    fn entity_id(&self) -> &str {
        &self.identity.entity_id
    }

    fn friendly_name(&self) -> &str {
        &self.identity.name
    }

    fn is_on(&self) -> bool {
        self.status
    }

    fn state(&self) -> EntityState {
        EntityState::from_reading(Some(self.status))
    }

    fn device_class(&self) -> Option<DeviceClass> {
        None
    }

    fn added_to_hub(&self, _ctx: &EntityContext) {}
}
