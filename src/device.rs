//! Home Assistant Device representation
//!
//! A Device represents the physical device that contains one or more entities.

use heapless::String;
use serde::Serialize;

use crate::{
    config::HaConfig,
    error::LightError,
    runtime::PublishOutbox,
    topic::{self, AVAILABILITY_OFFLINE, AVAILABILITY_ONLINE, MAX_TOPIC_LEN, TopicSuffix},
};

/// Device information for Home Assistant
#[derive(Debug, Clone)]
pub struct Device<'a> {
    /// Device identifier (used in topic generation)
    pub id: &'a str,
    /// Human-readable device name
    pub name: &'a str,
    /// Manufacturer name (optional)
    pub manufacturer: Option<&'a str>,
    /// Model name (optional)
    pub model: Option<&'a str>,
    /// Software version (optional)
    pub sw_version: Option<&'a str>,
    /// Whether entities report availability through one device-wide topic
    pub shared_availability: bool,
}

impl<'a> Device<'a> {
    /// Create a new device with the given ID and name
    pub const fn new(id: &'a str, name: &'a str) -> Self {
        Self {
            id,
            name,
            manufacturer: None,
            model: None,
            sw_version: None,
            shared_availability: false,
        }
    }

    /// Set manufacturer
    #[must_use]
    pub const fn with_manufacturer(mut self, manufacturer: &'a str) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    /// Set model
    #[must_use]
    pub const fn with_model(mut self, model: &'a str) -> Self {
        self.model = Some(model);
        self
    }

    /// Set software version
    #[must_use]
    pub const fn with_sw_version(mut self, sw_version: &'a str) -> Self {
        self.sw_version = Some(sw_version);
        self
    }

    /// Report availability of every entity through the device topic
    #[must_use]
    pub const fn with_shared_availability(mut self, shared: bool) -> Self {
        self.shared_availability = shared;
        self
    }

    /// Device object of the discovery payload.
    pub fn info(&self) -> DeviceInfo<'a> {
        DeviceInfo {
            identifiers: self.id,
            name: self.name,
            manufacturer: self.manufacturer,
            model: self.model,
            sw_version: self.sw_version,
        }
    }

    /// Device-wide availability topic.
    pub fn availability_topic(
        &self,
        config: &HaConfig<'_>,
    ) -> Result<String<MAX_TOPIC_LEN>, LightError> {
        topic::device_topic(config, self.id, TopicSuffix::Availability)
            .ok_or(LightError::TopicTooLong)
    }

    /// Publish the shared availability of all entities of this device.
    pub fn publish_availability(
        &self,
        config: &HaConfig<'_>,
        outbox: &mut dyn PublishOutbox,
        online: bool,
    ) -> Result<(), LightError> {
        if !self.shared_availability {
            return Err(LightError::AvailabilityNotConfigured);
        }

        let payload = if online {
            AVAILABILITY_ONLINE
        } else {
            AVAILABILITY_OFFLINE
        };
        let topic = self.availability_topic(config)?;
        if outbox.publish(topic.as_str(), payload.as_bytes(), true) {
            Ok(())
        } else {
            Err(LightError::PublishFailed)
        }
    }
}

/// Device information as serialized in discovery payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo<'a> {
    /// Device identifier
    #[serde(rename = "ids")]
    pub identifiers: &'a str,
    /// Human-readable device name
    pub name: &'a str,
    /// Manufacturer name (optional)
    #[serde(rename = "mf", skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<&'a str>,
    /// Model name (optional)
    #[serde(rename = "mdl", skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    /// Software version (optional)
    #[serde(rename = "sw", skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<&'a str>,
}
