//! Device class: what a binary sensor's on/off state means.

use serde::{Deserialize, Serialize};

/// Semantic class of a binary sensor.
///
/// `On` means: water detected, contact open, motion detected, battery
/// low/dead respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Moisture,
    Opening,
    Motion,
    Battery,
}

impl DeviceClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moisture => "moisture",
            Self::Opening => "opening",
            Self::Motion => "motion",
            Self::Battery => "battery",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
