//! State sink port: where entities push their recomputed state.

use minihub_domain::entity::Entity;

/// Receives entity snapshots whenever an entity recomputes its state.
///
/// Called synchronously from whatever context delivered the triggering
/// event (a controller callback or a timer), so implementations must not
/// block.
pub trait StateSink: Send + Sync {
    fn state_changed(&self, entity: Entity);
}
