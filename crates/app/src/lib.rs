//! # minihub-app
//!
//! Application layer: **port definitions** (traits) and the in-process
//! infrastructure integrations run against.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement or call:
//!   - `Integration` / `IntegrationContext`: integration lifecycle and discovery persistence
//!   - `BinarySensor`: capability interface of an on/off/unknown entity
//!   - `StateSink`: where entities push their recomputed state
//!   - `Scheduler`: one-shot timers with explicit cancellation handles
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `InProcessEventBus`: a `StateSink` fanning state changes out to subscribers
//!   - `TokioScheduler`: a `Scheduler` backed by tokio timers
//!
//! ## Dependency rule
//! Depends on `minihub-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod scheduler;
