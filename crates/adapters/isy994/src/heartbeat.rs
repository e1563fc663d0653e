//! Battery liveness companion of a leak or door/window sensor.
//!
//! The sensor's heartbeat node beats roughly once a day. Any activity of the
//! parent sensor counts as a beat too, which keeps a single missed heartbeat
//! from raising a false alarm. Once the timeout elapses without a beat the
//! battery is reported dead (`On`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use minihub_app::ports::{BinarySensor, EntityContext, TimerHandle};
use minihub_domain::entity::{AttributeValue, DeviceClass, EntityState};
use minihub_domain::id::{DeviceId, EntityId};

use crate::controller::{ControlEvent, Node};
use crate::identity::SensorIdentity;
use crate::sensor::BinarySensorDevice;

/// Binary sensor that turns on when its parent stops showing signs of life.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct HeartbeatSensor {
    shared: Arc<Shared>,
}

struct Shared {
    identity: SensorIdentity,
    node: Arc<dyn Node>,
    parent_entity_id: String,
    timeout: Duration,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    dead: Option<bool>,
    timer: Option<TimerHandle>,
    /// Bumped on every (re)arm so a superseded timer cannot fire.
    generation: u64,
    ctx: Option<EntityContext>,
    subscribed: bool,
}

impl HeartbeatSensor {
    pub fn new(node: Arc<dyn Node>, parent: &BinarySensorDevice, timeout: Duration) -> Self {
        let device_id = parent.device_id().unwrap_or_else(|| DeviceId::from_key(node.address()));
        let identity = SensorIdentity::for_node(node.as_ref(), device_id);
        Self::with_identity(node, identity, parent, timeout)
    }

    pub(crate) fn with_identity(
        node: Arc<dyn Node>,
        identity: SensorIdentity,
        parent: &BinarySensorDevice,
        timeout: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                identity,
                node,
                parent_entity_id: parent.entity_id().to_string(),
                timeout,
                inner: Mutex::new(Inner::default()),
            }),
        }
    }

    #[must_use]
    pub fn parent_entity_id(&self) -> &str {
        &self.shared.parent_entity_id
    }

    /// Mark the device alive and restart the countdown.
    pub fn heartbeat(&self) {
        let ctx = {
            let mut inner = self.inner();
            inner.dead = Some(false);
            inner.ctx.clone()
        };
        let Some(ctx) = ctx else {
            tracing::debug!(
                entity_id = %self.shared.identity.entity_id,
                "heartbeat received before being attached"
            );
            return;
        };
        self.restart_timer(&ctx);
        ctx.publish(self);
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn restart_timer(&self, ctx: &EntityContext) {
        let (previous, generation) = {
            let mut inner = self.inner();
            inner.generation += 1;
            (inner.timer.take(), inner.generation)
        };
        if let Some(previous) = previous {
            previous.cancel();
        }

        tracing::debug!(
            entity_id = %self.shared.identity.entity_id,
            timeout_secs = self.shared.timeout.as_secs(),
            "heartbeat timer starting"
        );

        let weak = Arc::downgrade(&self.shared);
        let handle = ctx.scheduler().schedule_after(
            self.shared.timeout,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    HeartbeatSensor { shared }.timer_elapsed(generation);
                }
            }),
        );

        let mut inner = self.inner();
        if inner.generation == generation {
            inner.timer = Some(handle);
        } else {
            drop(inner);
            handle.cancel();
        }
    }

    fn timer_elapsed(&self, generation: u64) {
        let ctx = {
            let mut inner = self.inner();
            if inner.generation != generation {
                return;
            }
            inner.dead = Some(true);
            inner.timer = None;
            inner.ctx.clone()
        };
        tracing::debug!(
            entity_id = %self.shared.identity.entity_id,
            parent_entity_id = %self.shared.parent_entity_id,
            "heartbeat missed, reporting battery dead"
        );
        if let Some(ctx) = ctx {
            ctx.publish(self);
        }
    }

    fn on_heartbeat_control(&self, event: &ControlEvent) {
        if *event == ControlEvent::On {
            self.heartbeat();
        }
    }
}

impl BinarySensor for HeartbeatSensor {
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
        self.inner().dead.unwrap_or(false)
    }

    fn state(&self) -> EntityState {
        EntityState::from_reading(self.inner().dead)
    }

    fn device_class(&self) -> Option<DeviceClass> {
        Some(DeviceClass::Battery)
    }

    fn extra_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (
                "parent_entity_id".to_string(),
                AttributeValue::from(self.parent_entity_id()),
            ),
            (
                "node_address".to_string(),
                AttributeValue::from(self.shared.node.address()),
            ),
        ])
    }

    /// Listen to the heartbeat node and start the countdown right away, so a
    /// sensor that never beats still leaves the unknown state.
    fn added_to_hub(&self, ctx: &EntityContext) {
        let first = {
            let mut inner = self.inner();
            inner.ctx = Some(ctx.clone());
            !std::mem::replace(&mut inner.subscribed, true)
        };
        if first {
            let weak = Arc::downgrade(&self.shared);
            self.shared.node.subscribe_control(Box::new(move |event| {
                if let Some(shared) = weak.upgrade() {
                    HeartbeatSensor { shared }.on_heartbeat_control(event);
                }
            }));
        }
        self.restart_timer(ctx);
    }

    fn removed_from_hub(&self) {
        let timer = {
            let mut inner = self.inner();
            inner.generation += 1;
            inner.ctx = None;
            inner.timer.take()
        };
        if let Some(timer) = timer {
            timer.cancel();
        }
    }
}
