//! Discovery payload builder
//!
//! Entities declare their discovery properties one by one, in the order they
//! should appear in the JSON object. Optional properties are simply not
//! declared. The bag has a fixed capacity so it can live on the stack.

use heapless::{String, Vec};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{
    device::DeviceInfo,
    error::LightError,
    topic::{MAX_TOPIC_LEN, TopicSuffix},
};

/// Maximum size of a serialized discovery payload
pub const MAX_DISCOVERY_LEN: usize = 1536;

/// Abbreviated discovery keys of non-topic properties.
pub mod keys {
    pub const NAME: &str = "name";
    pub const UNIQUE_ID: &str = "uniq_id";
    pub const ICON: &str = "ic";
    pub const RETAIN: &str = "ret";
    pub const OPTIMISTIC: &str = "opt";
    pub const BRIGHTNESS_SCALE: &str = "bri_scl";
    pub const MIN_MIREDS: &str = "min_mirs";
    pub const MAX_MIREDS: &str = "max_mirs";
    pub const DEVICE: &str = "dev";
}

/// Value of a single discovery property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue<'a> {
    Str(&'a str),
    Bool(bool),
    Number(u16),
    Topic(String<MAX_TOPIC_LEN>),
    Device(DeviceInfo<'a>),
}

impl Serialize for PropertyValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Str(value) => serializer.serialize_str(value),
            PropertyValue::Bool(value) => serializer.serialize_bool(*value),
            PropertyValue::Number(value) => serializer.serialize_u16(*value),
            PropertyValue::Topic(topic) => serializer.serialize_str(topic.as_str()),
            PropertyValue::Device(device) => device.serialize(serializer),
        }
    }
}

/// Ordered property bag serialized as a JSON object.
///
/// `MAX_PROPERTIES` is the number of properties the entity can declare at
/// most; declarations beyond it are rejected.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryPayload<'a, const MAX_PROPERTIES: usize> {
    properties: Vec<(&'static str, PropertyValue<'a>), MAX_PROPERTIES>,
}

impl<'a, const MAX_PROPERTIES: usize> DiscoveryPayload<'a, MAX_PROPERTIES> {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Declare a property.
    ///
    /// Returns `false` if the payload is full.
    pub fn set(&mut self, key: &'static str, value: PropertyValue<'a>) -> bool {
        self.properties.push((key, value)).is_ok()
    }

    /// Declare a string property if it has a value.
    pub fn set_optional(&mut self, key: &'static str, value: Option<&'a str>) -> bool {
        match value {
            Some(value) => self.set(key, PropertyValue::Str(value)),
            None => true,
        }
    }

    /// Declare a boolean flag, only when it is set.
    pub fn set_flag(&mut self, key: &'static str, value: bool) -> bool {
        !value || self.set(key, PropertyValue::Bool(value))
    }

    /// Declare a numeric property if it has a value.
    pub fn set_number(&mut self, key: &'static str, value: Option<u16>) -> bool {
        match value {
            Some(value) => self.set(key, PropertyValue::Number(value)),
            None => true,
        }
    }

    /// Declare a topic property, keyed by its suffix.
    pub fn topic(&mut self, suffix: TopicSuffix, topic: String<MAX_TOPIC_LEN>) -> bool {
        self.set(suffix.as_str(), PropertyValue::Topic(topic))
    }

    /// Look up a declared property.
    pub fn get(&self, key: &str) -> Option<&PropertyValue<'a>> {
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|(key, _)| *key)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize into `buf`, returning the JSON length.
    pub fn to_slice(&self, buf: &mut [u8]) -> Result<usize, LightError> {
        serde_json_core::to_slice(self, buf).map_err(|_| LightError::Serialization)
    }
}

impl<const MAX_PROPERTIES: usize> Serialize for DiscoveryPayload<'_, MAX_PROPERTIES> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
