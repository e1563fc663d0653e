//! Classification of Insteon device-type codes.
//!
//! Only the category and subcategory (the first two dot-separated
//! components of `"16.8.1.0"`) matter.

use minihub_domain::entity::DeviceClass;

/// Sensor families this adapter knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Moisture,
    Opening,
    Motion,
}

const DEVICE_TYPES: &[(SensorKind, &[&str])] = &[
    (SensorKind::Moisture, &["16.8", "16.13", "16.14"]),
    (
        SensorKind::Opening,
        &["16.9", "16.6", "16.7", "16.2", "16.17", "16.20", "16.21"],
    ),
    (SensorKind::Motion, &["16.1", "16.4", "16.5", "16.3"]),
];

impl SensorKind {
    #[must_use]
    pub fn device_class(self) -> DeviceClass {
        match self {
            Self::Moisture => DeviceClass::Moisture,
            Self::Opening => DeviceClass::Opening,
            Self::Motion => DeviceClass::Motion,
        }
    }

    /// Leak and door/window sensors expose a negative node (subnode 2) and a
    /// heartbeat node (subnode 4) next to their primary node.
    #[must_use]
    pub fn has_companion_nodes(self) -> bool {
        matches!(self, Self::Moisture | Self::Opening)
    }
}

/// Classify a device-type code, `None` when absent or unmatched.
#[must_use]
pub fn detect(device_type: Option<&str>) -> Option<SensorKind> {
    let mut parts = device_type?.split('.');
    let prefix = (parts.next()?, parts.next()?);

    DEVICE_TYPES
        .iter()
        .find(|(_, codes)| codes.iter().any(|code| code.split_once('.') == Some(prefix)))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_leak_sensor_as_moisture() {
        assert_eq!(detect(Some("16.8.65.0")), Some(SensorKind::Moisture));
        assert_eq!(detect(Some("16.13.0.0")), Some(SensorKind::Moisture));
        assert_eq!(detect(Some("16.14.1.0")), Some(SensorKind::Moisture));
    }

    #[test]
    fn should_detect_door_window_sensors_as_opening() {
        for code in [
            "16.9.0.0",
            "16.6.1.0",
            "16.7.0.0",
            "16.2.64.0",
            "16.17.1.0",
            "16.20.0.0",
            "16.21.0.0",
        ] {
            assert_eq!(detect(Some(code)), Some(SensorKind::Opening), "{code}");
        }
    }

    #[test]
    fn should_detect_motion_sensors() {
        for code in ["16.1.65.0", "16.4.0.0", "16.5.0.0", "16.3.0.0"] {
            assert_eq!(detect(Some(code)), Some(SensorKind::Motion), "{code}");
        }
    }

    #[test]
    fn should_only_depend_on_leading_two_components() {
        assert_eq!(detect(Some("16.8")), detect(Some("16.8.99.7")));
        assert_eq!(detect(Some("16.1.0.0")), detect(Some("16.1.200.3")));
    }

    #[test]
    fn should_not_match_on_prefix_of_subcategory() {
        // 16.10 must not be mistaken for 16.1
        assert_eq!(detect(Some("16.10.0.0")), None);
    }

    #[test]
    fn should_not_match_other_categories() {
        assert_eq!(detect(Some("1.8.0.0")), None);
        assert_eq!(detect(Some("2.42.67.0")), None);
    }

    #[test]
    fn should_not_match_missing_or_truncated_codes() {
        assert_eq!(detect(None), None);
        assert_eq!(detect(Some("")), None);
        assert_eq!(detect(Some("16")), None);
    }

    #[test]
    fn should_map_kinds_to_device_classes() {
        assert_eq!(SensorKind::Moisture.device_class(), DeviceClass::Moisture);
        assert_eq!(SensorKind::Opening.device_class(), DeviceClass::Opening);
        assert_eq!(SensorKind::Motion.device_class(), DeviceClass::Motion);
        assert!(!SensorKind::Motion.has_companion_nodes());
    }
}
