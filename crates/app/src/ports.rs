//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the hub and the adapter layer
//! can depend on them without creating circular dependencies.

pub mod binary_sensor;
pub mod integration;
pub mod scheduler;
pub mod state_sink;

pub use binary_sensor::{BinarySensor, EntityContext};
pub use integration::{DiscoveredDevice, Integration, IntegrationContext};
pub use scheduler::{Scheduler, TimerHandle, TimerTask};
pub use state_sink::StateSink;
