//! ISY994 integration configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the ISY994 binary-sensor integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Isy994Config {
    /// Hours without any sign of life before a sensor's battery is
    /// reported dead.
    pub heartbeat_timeout_hours: u32,
    /// Units of measure that mark a node as a binary sensor.
    pub sensor_units: Vec<String>,
    /// State names a node may report in place of a unit of measure.
    pub sensor_states: Vec<String>,
    /// Controller program folder holding binary-sensor programs.
    pub program_folder: String,
}

impl Isy994Config {
    #[must_use]
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.heartbeat_timeout_hours) * 3600)
    }
}

impl Default for Isy994Config {
    fn default() -> Self {
        Self {
            heartbeat_timeout_hours: 25,
            sensor_units: vec!["2".to_string(), "78".to_string()],
            sensor_states: ["off", "on", "true", "false"]
                .map(String::from)
                .to_vec(),
            program_folder: "binary_sensor".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = Isy994Config::default();
        assert_eq!(config.heartbeat_timeout_hours, 25);
        assert_eq!(config.heartbeat_timeout(), Duration::from_secs(90_000));
        assert_eq!(config.sensor_units, ["2", "78"]);
        assert_eq!(config.sensor_states, ["off", "on", "true", "false"]);
        assert_eq!(config.program_folder, "binary_sensor");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            heartbeat_timeout_hours = 49
            sensor_units = ["2"]
            sensor_states = ["on", "off"]
            program_folder = "sensors"
        "#;
        let config: Isy994Config = toml::from_str(toml).unwrap();
        assert_eq!(config.heartbeat_timeout(), Duration::from_secs(49 * 3600));
        assert_eq!(config.sensor_units, ["2"]);
        assert_eq!(config.sensor_states, ["on", "off"]);
        assert_eq!(config.program_folder, "sensors");
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: Isy994Config = toml::from_str("heartbeat_timeout_hours = 1").unwrap();
        assert_eq!(config.heartbeat_timeout_hours, 1);
        assert_eq!(config.sensor_units, ["2", "78"]);
        assert_eq!(config.program_folder, "binary_sensor");
    }
}
