//! Device: a physical or virtual thing that exposes one or more entities.

use serde::{Deserialize, Serialize};

use crate::error::{MiniHubError, ValidationError};
use crate::id::DeviceId;

/// A physical or virtual device, grouping the entities it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// Name of the integration that discovered the device (e.g. `"isy994"`).
    pub integration: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MiniHubError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), MiniHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    integration: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn integration(mut self, integration: impl Into<String>) -> Self {
        self.integration = Some(integration.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`MiniHubError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Device, MiniHubError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            integration: self.integration,
            manufacturer: self.manufacturer,
            model: self.model,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_device_with_metadata() {
        let device = Device::builder()
            .name("Hallway Motion")
            .integration("isy994")
            .manufacturer("Universal Devices")
            .model("16.1.65.0")
            .build()
            .unwrap();
        assert_eq!(device.name, "Hallway Motion");
        assert_eq!(device.integration.as_deref(), Some("isy994"));
        assert_eq!(device.model.as_deref(), Some("16.1.65.0"));
    }

    #[test]
    fn should_keep_explicit_id() {
        let id = DeviceId::from_key("isy994:node:1");
        let device = Device::builder().id(id).name("Leak").build().unwrap();
        assert_eq!(device.id, id);
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = Device::builder().build();
        assert!(matches!(
            result,
            Err(MiniHubError::Validation(ValidationError::EmptyName))
        ));
    }
}
