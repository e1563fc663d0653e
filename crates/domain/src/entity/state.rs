//! Entity state: the current operational state of an entity.

use serde::{Deserialize, Serialize};

/// Discrete operational state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
}

impl EntityState {
    /// Map a three-valued reading onto a state, `None` meaning indeterminate.
    #[must_use]
    pub fn from_reading(reading: Option<bool>) -> Self {
        match reading {
            Some(true) => Self::On,
            Some(false) => Self::Off,
            None => Self::Unknown,
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_readings_to_states() {
        assert_eq!(EntityState::from_reading(Some(true)), EntityState::On);
        assert_eq!(EntityState::from_reading(Some(false)), EntityState::Off);
        assert_eq!(EntityState::from_reading(None), EntityState::Unknown);
    }

    #[test]
    fn should_default_to_unknown() {
        assert_eq!(EntityState::default(), EntityState::Unknown);
    }

    #[test]
    fn should_serialize_as_lowercase_string() {
        let json = serde_json::to_string(&EntityState::Off).unwrap();
        assert_eq!(json, "\"off\"");
        assert_eq!(EntityState::Off.to_string(), "off");
    }
}
