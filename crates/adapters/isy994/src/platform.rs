//! Turns the controller's sensor nodes and programs into binary sensors.
//!
//! Top-level nodes become sensors first; child nodes are folded into their
//! parent afterwards, so the order the controller lists them in does not
//! matter.

use std::collections::HashMap;
use std::sync::Arc;

use minihub_app::ports::BinarySensor;
use minihub_domain::device::Device;

use crate::config::Isy994Config;
use crate::controller::{ConnectionStatus, Node, Program};
use crate::device_type::{self, SensorKind};
use crate::error::IsyError;
use crate::heartbeat::HeartbeatSensor;
use crate::identity::{EntityIds, SensorIdentity, node_device_id};
use crate::program::ProgramSensor;
use crate::sensor::BinarySensorDevice;

const INTEGRATION: &str = "isy994";
const MANUFACTURER: &str = "Universal Devices";
const NEGATIVE_SUBNODE: u32 = 2;
const HEARTBEAT_SUBNODE: u32 = 4;

/// Any sensor this adapter exposes.
#[derive(Clone)]
pub enum IsySensor {
    Device(BinarySensorDevice),
    Heartbeat(HeartbeatSensor),
    Program(ProgramSensor),
}

impl IsySensor {
    #[must_use]
    pub fn as_binary_sensor(&self) -> &dyn BinarySensor {
        match self {
            Self::Device(sensor) => sensor,
            Self::Heartbeat(sensor) => sensor,
            Self::Program(sensor) => sensor,
        }
    }
}

/// Devices and the sensors they expose.
#[derive(Default)]
pub struct SensorSet {
    pub devices: Vec<Device>,
    pub sensors: Vec<IsySensor>,
}

/// Build every binary sensor for the given controller state.
///
/// # Errors
///
/// Returns [`IsyError::NotConnected`] when the controller is not connected,
/// or [`IsyError::Domain`] if a device descriptor fails validation.
pub fn build_sensors(
    config: &Isy994Config,
    connection: ConnectionStatus,
    nodes: &[Arc<dyn Node>],
    programs: &[Program],
) -> Result<SensorSet, IsyError> {
    if !connection.is_connected() {
        tracing::error!("a connection has not been made to the ISY controller");
        return Err(IsyError::NotConnected);
    }

    let mut set = SensorSet::default();
    let mut entity_ids = EntityIds::default();
    let mut parents: HashMap<&str, BinarySensorDevice> = HashMap::new();
    let mut children = Vec::new();

    for node in nodes {
        if !is_sensor_node(node.as_ref(), &config.sensor_units, &config.sensor_states) {
            continue;
        }
        if let Some(parent_address) = node.parent_address() {
            children.push((node, parent_address));
            continue;
        }
        let device = node_device(node.as_ref())?;
        let identity = entity_ids.claim(SensorIdentity::for_node(node.as_ref(), device.id));
        let sensor = BinarySensorDevice::with_identity(Arc::clone(node), identity);
        parents.insert(node.address(), sensor.clone());
        set.devices.push(device);
        set.sensors.push(IsySensor::Device(sensor));
    }

    for (node, parent_address) in children {
        let Some(parent) = parents.get(parent_address) else {
            tracing::error!(
                node = node.address(),
                parent = parent_address,
                "node has a parent node, but no device was created for the parent, skipping"
            );
            continue;
        };

        match device_type::detect(node.device_type()) {
            Some(kind) if kind.has_companion_nodes() => {
                attach_companion(config, &mut set, &mut entity_ids, parent, node, kind);
            }
            _ => {
                let device_id = node_device_id(parent_address);
                let identity = SensorIdentity::for_node(node.as_ref(), device_id);
                let sensor =
                    BinarySensorDevice::with_identity(Arc::clone(node), entity_ids.claim(identity));
                set.sensors.push(IsySensor::Device(sensor));
            }
        }
    }

    for program in programs {
        let Some(status) = program.status else {
            tracing::warn!(program = %program.name, "program has no status, skipping");
            continue;
        };
        let identity = SensorIdentity::for_program(&program.address, &program.name);
        let sensor = ProgramSensor::with_identity(entity_ids.claim(identity), status);
        let device = Device::builder()
            .id(sensor.device_id().unwrap_or_default())
            .name(sensor.friendly_name())
            .integration(INTEGRATION)
            .manufacturer(MANUFACTURER)
            .model("Program")
            .build()?;
        set.devices.push(device);
        set.sensors.push(IsySensor::Program(sensor));
    }

    tracing::info!(
        devices = set.devices.len(),
        sensors = set.sensors.len(),
        "ISY994 binary sensors built"
    );
    Ok(set)
}

/// Leak and door/window sensors: subnode 4 beats, subnode 2 reports "off".
fn attach_companion(
    config: &Isy994Config,
    set: &mut SensorSet,
    entity_ids: &mut EntityIds,
    parent: &BinarySensorDevice,
    node: &Arc<dyn Node>,
    kind: SensorKind,
) {
    match subnode_id(node.address()) {
        Some(HEARTBEAT_SUBNODE) => {
            let device_id = node_device_id(parent.node_address());
            let identity = SensorIdentity::for_node(node.as_ref(), device_id);
            let heartbeat = HeartbeatSensor::with_identity(
                Arc::clone(node),
                entity_ids.claim(identity),
                parent,
                config.heartbeat_timeout(),
            );
            parent.add_heartbeat_device(heartbeat.clone());
            set.sensors.push(IsySensor::Heartbeat(heartbeat));
        }
        Some(NEGATIVE_SUBNODE) => parent.add_negative_node(Arc::clone(node)),
        subnode => tracing::debug!(
            node = node.address(),
            ?kind,
            ?subnode,
            "ignoring companion node"
        ),
    }
}

/// A node is a binary sensor if it reports in one of `units`, or only ever in
/// one of the `states` names.
fn is_sensor_node(node: &dyn Node, units: &[String], states: &[String]) -> bool {
    let uom = node.uom();
    uom.iter().any(|unit| units.contains(unit))
        || (!uom.is_empty() && uom.iter().all(|unit| states.contains(unit)))
}

fn subnode_id(address: &str) -> Option<u32> {
    address.chars().last()?.to_digit(10)
}

fn node_device(node: &dyn Node) -> Result<Device, IsyError> {
    let name = if node.name().trim().is_empty() {
        node.address()
    } else {
        node.name()
    };
    let mut builder = Device::builder()
        .id(node_device_id(node.address()))
        .name(name)
        .integration(INTEGRATION)
        .manufacturer(MANUFACTURER);
    if let Some(device_type) = node.device_type() {
        builder = builder.model(device_type);
    }
    Ok(builder.build()?)
}
