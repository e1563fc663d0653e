//! In-crate fakes for the controller library and the hub.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use minihub_app::ports::{EntityContext, Scheduler, StateSink, TimerHandle, TimerTask};
use minihub_domain::entity::{Entity, EntityState};

use crate::controller::{ControlEvent, ControlHandler, Node};

pub(crate) const HOUR: Duration = Duration::from_secs(3600);

/// A controller node whose control events are emitted by the test.
pub(crate) struct FakeNode {
    address: String,
    name: String,
    device_type: Option<String>,
    uom: Vec<String>,
    status: f64,
    parent: Option<String>,
    handlers: Mutex<Vec<ControlHandler>>,
}

impl FakeNode {
    pub fn new(address: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            name: name.to_string(),
            device_type: None,
            uom: vec!["2".to_string()],
            status: 0.0,
            parent: None,
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_type(mut self, device_type: &str) -> Self {
        self.device_type = Some(device_type.to_string());
        self
    }

    pub fn with_status(mut self, status: f64) -> Self {
        self.status = status;
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_uom(mut self, uom: &[&str]) -> Self {
        self.uom = uom.iter().map(ToString::to_string).collect();
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn emit(&self, event: ControlEvent) {
        for handler in self.handlers.lock().unwrap().iter() {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}

impl Node for FakeNode {
    fn address(&self) -> &str {
        &self.address
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    fn uom(&self) -> &[String] {
        &self.uom
    }

    fn status(&self) -> f64 {
        self.status
    }

    fn parent_address(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    fn subscribe_control(&self, handler: ControlHandler) {
        self.handlers.lock().unwrap().push(handler);
    }
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<(u64, Duration, TimerTask)>,
}

/// Scheduler driven by [`advance`](Self::advance) instead of wall time.
#[derive(Default)]
pub(crate) struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    /// Move time forward, running every task that falls due, in deadline order.
    pub fn advance(&self, by: Duration) {
        let due = {
            let mut clock = self.clock.lock().unwrap();
            clock.now += by;
            let now = clock.now;
            let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut clock.pending)
                .into_iter()
                .partition(|(_, deadline, _)| *deadline <= now);
            clock.pending = pending;
            due.sort_by_key(|(_, deadline, _)| *deadline);
            due
        };
        for (_, _, task) in due {
            task();
        }
    }

    pub fn pending(&self) -> usize {
        self.clock.lock().unwrap().pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let mut clock = self.clock.lock().unwrap();
        let id = clock.next_id;
        clock.next_id += 1;
        let deadline = clock.now + delay;
        clock.pending.push((id, deadline, task));

        let shared = Arc::clone(&self.clock);
        TimerHandle::new(move || {
            shared
                .lock()
                .unwrap()
                .pending
                .retain(|(pending_id, _, _)| *pending_id != id);
        })
    }
}

/// Hub stand-in recording every published snapshot.
#[derive(Default)]
pub(crate) struct RecordingSink {
    published: Mutex<Vec<Entity>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn states_of(&self, entity_id: &str) -> Vec<EntityState> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|entity| entity.entity_id == entity_id)
            .map(|entity| entity.state)
            .collect()
    }

    pub fn last(&self) -> Option<Entity> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl StateSink for RecordingSink {
    fn state_changed(&self, entity: Entity) {
        self.published.lock().unwrap().push(entity);
    }
}

/// Sink, scheduler and the [`EntityContext`] wrapping both.
pub(crate) struct Hub {
    pub sink: Arc<RecordingSink>,
    pub scheduler: Arc<ManualScheduler>,
    pub ctx: EntityContext,
}

impl Default for Hub {
    fn default() -> Self {
        let sink = Arc::new(RecordingSink::default());
        let scheduler = Arc::new(ManualScheduler::default());
        let ctx = EntityContext::new(
            Arc::clone(&sink) as Arc<dyn StateSink>,
            Arc::clone(&scheduler) as Arc<dyn Scheduler>,
        );
        Self {
            sink,
            scheduler,
            ctx,
        }
    }
}
