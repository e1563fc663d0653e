//! Model of the ISY994 controller as seen by this adapter.
//!
//! The controller library owns the connection and the node objects; this
//! module only describes what the adapter reads from it: node metadata, a
//! numeric status, a control-event stream, and the program folders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback invoked for every control event a node reports.
pub type ControlHandler = Box<dyn Fn(&ControlEvent) + Send + Sync>;

/// A command reported on a node's control-event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// `DON`
    On,
    /// `DOF`
    Off,
    Other(String),
}

impl ControlEvent {
    /// The controller's command code for this event.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::On => "DON",
            Self::Off => "DOF",
            Self::Other(command) => command,
        }
    }
}

impl From<&str> for ControlEvent {
    fn from(command: &str) -> Self {
        match command {
            "DON" => Self::On,
            "DOF" => Self::Off,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A sensor endpoint reported by the controller.
pub trait Node: Send + Sync {
    /// Controller address, e.g. `"2A 3B 4C 1"`. The last character is the
    /// subnode number.
    fn address(&self) -> &str;

    fn name(&self) -> &str;

    /// Insteon device-type code such as `"16.8.1.0"`, when the controller
    /// reported one.
    fn device_type(&self) -> Option<&str>;

    /// Units of measure (or state names) the node reports in.
    fn uom(&self) -> &[String];

    /// Raw status value; negative infinity means unknown.
    fn status(&self) -> f64;

    fn parent_address(&self) -> Option<&str>;

    /// Register `handler` on the node's control-event stream.
    fn subscribe_control(&self, handler: ControlHandler);
}

/// Whether a raw status value is the controller library's unknown sentinel.
#[must_use]
pub fn is_unknown(value: f64) -> bool {
    value.is_infinite() && value.is_sign_negative()
}

/// Interpret a raw status as a binary reading.
#[must_use]
pub fn status_reading(value: f64) -> Option<bool> {
    if is_unknown(value) {
        None
    } else {
        Some(value != 0.0)
    }
}

/// Whether the controller library currently holds a live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// A controller program; `status` is absent when the controller did not
/// report one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub address: String,
    pub name: String,
    pub status: Option<bool>,
}

/// Everything the adapter needs from a connected controller.
#[derive(Clone)]
pub struct ControllerSnapshot {
    pub connection: ConnectionStatus,
    /// Nodes from the controller's sensor folder.
    pub nodes: Vec<Arc<dyn Node>>,
    /// Programs keyed by the folder (platform) they were filed under.
    pub programs: HashMap<String, Vec<Program>>,
}

impl ControllerSnapshot {
    /// Programs filed under `folder`.
    #[must_use]
    pub fn programs_in(&self, folder: &str) -> &[Program] {
        self.programs.get(folder).map_or(&[][..], Vec::as_slice)
    }
}

impl fmt::Debug for ControllerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerSnapshot")
            .field("connection", &self.connection)
            .field("nodes", &self.nodes.len())
            .field("programs", &self.programs)
            .finish()
    }
}
