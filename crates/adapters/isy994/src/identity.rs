//! Stable minihub identity for controller-backed sensors.

use std::collections::HashSet;

use minihub_domain::entity::slugify;
use minihub_domain::id::{DeviceId, EntityId};

use crate::controller::Node;

const ENTITY_DOMAIN: &str = "binary_sensor";

/// Ids and names a sensor is known by in the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SensorIdentity {
    pub id: EntityId,
    pub device_id: DeviceId,
    pub entity_id: String,
    pub name: String,
}

impl SensorIdentity {
    pub fn for_node(node: &dyn Node, device_id: DeviceId) -> Self {
        Self::new(&node_key(node.address()), node.name(), node.address(), device_id)
    }

    pub fn for_program(address: &str, name: &str) -> Self {
        let key = program_key(address);
        Self::new(&key, name, address, DeviceId::from_key(&key))
    }

    fn new(key: &str, name: &str, address: &str, device_id: DeviceId) -> Self {
        let name = if name.trim().is_empty() { address } else { name };
        let object_id = match slugify(name) {
            slug if slug.is_empty() => format!("isy994_{}", slugify(address)),
            slug => slug,
        };
        Self {
            id: EntityId::from_key(key),
            device_id,
            entity_id: format!("{ENTITY_DOMAIN}.{object_id}"),
            name: name.to_string(),
        }
    }
}

/// Entity ids handed out so far while building one set of sensors.
#[derive(Debug, Default)]
pub(crate) struct EntityIds {
    used: HashSet<String>,
}

impl EntityIds {
    /// Reserve the identity's entity id, appending `_2`, `_3`, ... while it
    /// is already taken.
    pub fn claim(&mut self, mut identity: SensorIdentity) -> SensorIdentity {
        let base = identity.entity_id.clone();
        let mut suffix = 1;
        while !self.used.insert(identity.entity_id.clone()) {
            suffix += 1;
            identity.entity_id = format!("{base}_{suffix}");
        }
        identity
    }
}

/// Device id for the physical device a top-level node belongs to.
pub(crate) fn node_device_id(address: &str) -> DeviceId {
    DeviceId::from_key(&node_key(address))
}

fn node_key(address: &str) -> String {
    format!("isy994:node:{address}")
}

fn program_key(address: &str) -> String {
    format!("isy994:program:{address}")
}
