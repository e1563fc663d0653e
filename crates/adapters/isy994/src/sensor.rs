//! Node-backed binary sensor.
//!
//! A single physical sensor is often reported as several controller nodes.
//! [`BinarySensorDevice`] folds the primary node and an optional negative
//! node into one entity:
//!
//! | Node | Command | Computed state |
//! |------|---------|----------------|
//! | primary | `DON` | on |
//! | primary | `DOF` | off |
//! | negative | `DON` | off |
//!
//! Every transition also counts as a heartbeat for the attached
//! [`HeartbeatSensor`], if any. Other commands are ignored, and so are plain
//! status updates: only control events drive the state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use minihub_app::ports::{BinarySensor, EntityContext};
use minihub_domain::entity::{AttributeValue, DeviceClass, EntityState};
use minihub_domain::id::{DeviceId, EntityId};

use crate::controller::{ControlEvent, Node, status_reading};
use crate::device_type::{self, SensorKind};
use crate::heartbeat::HeartbeatSensor;
use crate::identity::SensorIdentity;

/// Binary sensor computed from a primary node and an optional negative node.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct BinarySensorDevice {
    shared: Arc<Shared>,
}

struct Shared {
    identity: SensorIdentity,
    node: Arc<dyn Node>,
    kind: Option<SensorKind>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    computed: Option<bool>,
    negative: Option<Arc<dyn Node>>,
    heartbeat: Option<HeartbeatSensor>,
    ctx: Option<EntityContext>,
    subscribed: bool,
}

impl BinarySensorDevice {
    /// Wrap `node`, seeding the state from its current status.
    pub fn new(node: Arc<dyn Node>, device_id: DeviceId) -> Self {
        let identity = SensorIdentity::for_node(node.as_ref(), device_id);
        Self::with_identity(node, identity)
    }

    pub(crate) fn with_identity(node: Arc<dyn Node>, identity: SensorIdentity) -> Self {
        let kind = device_type::detect(node.device_type());
        let inner = Inner {
            computed: status_reading(node.status()),
            ..Inner::default()
        };
        Self {
            shared: Arc::new(Shared {
                identity,
                node,
                kind,
                inner: Mutex::new(inner),
            }),
        }
    }

    #[must_use]
    pub fn node_address(&self) -> &str {
        self.shared.node.address()
    }

    /// Route any activity of this sensor to `device` as a heartbeat.
    pub fn add_heartbeat_device(&self, device: HeartbeatSensor) {
        self.inner().heartbeat = Some(device);
    }

    /// Use `node` as the source of "off" events.
    ///
    /// The state can no longer be derived from the primary node's status
    /// alone, so it becomes unknown until the first control event.
    pub fn add_negative_node(&self, node: Arc<dyn Node>) {
        let mut inner = self.inner();
        inner.negative = Some(node);
        inner.computed = None;
    }

    #[must_use]
    pub fn has_negative_node(&self) -> bool {
        self.inner().negative.is_some()
    }

    /// The reading exposed to the hub.
    ///
    /// Insteon leak sensors report on while *dry*, so moisture sensors are
    /// inverted. Unknown stays unknown.
    #[must_use]
    pub fn value(&self) -> Option<bool> {
        let computed = self.inner().computed?;
        if self.shared.kind == Some(SensorKind::Moisture) {
            Some(!computed)
        } else {
            Some(computed)
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn on_primary_control(&self, event: &ControlEvent) {
        match event {
            ControlEvent::On => {
                tracing::debug!(
                    entity_id = %self.shared.identity.entity_id,
                    "sensor turning on via the primary node"
                );
                self.apply(true);
            }
            ControlEvent::Off => {
                tracing::debug!(
                    entity_id = %self.shared.identity.entity_id,
                    "sensor turning off via the primary node"
                );
                self.apply(false);
            }
            ControlEvent::Other(_) => {}
        }
    }

    fn on_negative_control(&self, event: &ControlEvent) {
        if *event == ControlEvent::On {
            tracing::debug!(
                entity_id = %self.shared.identity.entity_id,
                "sensor turning off via the negative node"
            );
            self.apply(false);
        }
    }

    fn apply(&self, computed: bool) {
        let (ctx, heartbeat) = {
            let mut inner = self.inner();
            inner.computed = Some(computed);
            (inner.ctx.clone(), inner.heartbeat.clone())
        };
        if let Some(ctx) = ctx {
            ctx.publish(self);
        }
        if let Some(heartbeat) = heartbeat {
            heartbeat.heartbeat();
        }
    }

    fn subscribe(&self, node: &dyn Node, handler: fn(&Self, &ControlEvent)) {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        node.subscribe_control(Box::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                handler(&BinarySensorDevice { shared }, event);
            }
        }));
    }
}

impl BinarySensor for BinarySensorDevice {
    fn id(&self) -> EntityId {
        self.shared.identity.id
    }

    fn device_id(&self) -> Option<DeviceId> {
        Some(self.shared.identity.device_id)
    }

    fn entity_id(&self) -> &str {
        &self.shared.identity.entity_id
    }

    fn friendly_name(&self) -> &str {
        &self.shared.identity.name
    }

    fn is_on(&self) -> bool {
        self.value().unwrap_or(false)
    }

    fn state(&self) -> EntityState {
        EntityState::from_reading(self.value())
    }

    fn device_class(&self) -> Option<DeviceClass> {
        self.shared.kind.map(SensorKind::device_class)
    }

    fn extra_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([(
            "node_address".to_string(),
            AttributeValue::from(self.node_address()),
        )])
    }

    fn added_to_hub(&self, ctx: &EntityContext) {
        let negative = {
            let mut inner = self.inner();
            inner.ctx = Some(ctx.clone());
            if inner.subscribed {
                return;
            }
            inner.subscribed = true;
            inner.negative.clone()
        };
        self.subscribe(self.shared.node.as_ref(), Self::on_primary_control);
        if let Some(negative) = negative {
            self.subscribe(negative.as_ref(), Self::on_negative_control);
        }
    }

    fn removed_from_hub(&self) {
        self.inner().ctx = None;
    }
}
