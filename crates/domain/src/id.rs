//! Typed identifier newtypes backed by UUIDs.
//!
//! Integrations that mirror an external system derive their identifiers from
//! that system's own addresses with [`from_key`](EntityId::from_key), so the
//! same controller node always maps to the same minihub id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $namespace:expr) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Derive a stable identifier from an external key.
            #[must_use]
            pub fn from_key(key: &str) -> Self {
                Self(uuid::Uuid::new_v5(&$namespace, key.as_bytes()))
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

const ENTITY_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x6d69_6e69_6875_6200_0000_0000_0000_0001);
const DEVICE_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x6d69_6e69_6875_6200_0000_0000_0000_0002);
const EVENT_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x6d69_6e69_6875_6200_0000_0000_0000_0003);

define_id!(
    /// Unique identifier for an [`Entity`](crate::entity::Entity).
    EntityId,
    ENTITY_NAMESPACE
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId,
    DEVICE_NAMESPACE
);

define_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId,
    EVENT_NAMESPACE
);
