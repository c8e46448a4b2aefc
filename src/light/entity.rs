//! Light entity configuration
//!
//! [`LightEntity`] is the immutable part of a light: identity, capabilities
//! and discovery options. It knows how to derive its topics, how to build its
//! discovery payload and how to format each state value for publishing.

use heapless::String;

use super::features::LightFeatures;
use crate::{
    color::{RgbColor, RgbwColor},
    config::HaConfig,
    device::Device,
    discovery::{DiscoveryPayload, MAX_DISCOVERY_LEN, PropertyValue, keys},
    error::LightError,
    numeric::{Numeric, U8_DIGITS, U16_DIGITS},
    runtime::PublishOutbox,
    topic::{
        self, AVAILABILITY_OFFLINE, AVAILABILITY_ONLINE, LIGHT_COMPONENT, MAX_TOPIC_LEN,
        STATE_OFF, STATE_ON, TopicSuffix,
    },
};

/// Upper bound of properties a light declares in its discovery payload.
pub const LIGHT_MAX_PROPERTIES: usize = 20;

/// Discovery payload of a light.
pub type LightDiscovery<'a> = DiscoveryPayload<'a, LIGHT_MAX_PROPERTIES>;

/// Light entity configuration
#[derive(Debug, Clone)]
pub struct LightEntity<'a> {
    /// Entity identifier, unique within the device
    pub unique_id: &'a str,
    /// Optional capabilities
    pub features: LightFeatures,
    /// Reference to parent device
    pub device: &'a Device<'a>,
    /// Topic prefixes
    pub config: HaConfig<'a>,
    /// Human-readable name
    pub name: Option<&'a str>,
    /// MDI icon (e.g., "mdi:lightbulb")
    pub icon: Option<&'a str>,
    /// Whether Home Assistant publishes commands as retained messages
    pub retain: bool,
    /// Whether the entity works in optimistic mode
    pub optimistic: bool,
    /// Whether the entity reports its own availability
    pub availability: bool,
    /// Brightness value that means "full"
    pub brightness_scale: Option<u8>,
    /// Minimum color temperature in mireds
    pub min_mireds: Option<u16>,
    /// Maximum color temperature in mireds
    pub max_mireds: Option<u16>,
}

impl<'a> LightEntity<'a> {
    /// Create a new light entity with required fields
    pub const fn new(unique_id: &'a str, features: LightFeatures, device: &'a Device<'a>) -> Self {
        Self {
            unique_id,
            features,
            device,
            config: HaConfig::DEFAULT,
            name: None,
            icon: None,
            retain: false,
            optimistic: false,
            availability: false,
            brightness_scale: None,
            min_mireds: None,
            max_mireds: None,
        }
    }

    /// Set topic prefixes
    #[must_use]
    pub const fn with_config(mut self, config: HaConfig<'a>) -> Self {
        self.config = config;
        self
    }

    /// Set name
    #[must_use]
    pub const fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Set icon
    #[must_use]
    pub const fn with_icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set retain mode
    ///
    /// A retained light relies on the broker for its state and skips the
    /// state burst on reconnection.
    #[must_use]
    pub const fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    /// Set optimistic mode
    #[must_use]
    pub const fn with_optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    /// Report availability on the entity's own topic
    #[must_use]
    pub const fn with_availability(mut self, availability: bool) -> Self {
        self.availability = availability;
        self
    }

    /// Set brightness scale
    #[must_use]
    pub const fn with_brightness_scale(mut self, scale: u8) -> Self {
        self.brightness_scale = Some(scale);
        self
    }

    /// Set minimum color temperature
    #[must_use]
    pub const fn with_min_mireds(mut self, mireds: u16) -> Self {
        self.min_mireds = Some(mireds);
        self
    }

    /// Set maximum color temperature
    #[must_use]
    pub const fn with_max_mireds(mut self, mireds: u16) -> Self {
        self.max_mireds = Some(mireds);
        self
    }

    /// Set color temperature range
    #[must_use]
    pub const fn with_mireds_range(self, min: u16, max: u16) -> Self {
        self.with_min_mireds(min).with_max_mireds(max)
    }

    pub const fn has_unique_id(&self) -> bool {
        !self.unique_id.is_empty()
    }

    /// Check a feature, failing with [`LightError::FeatureDisabled`].
    pub fn require(&self, feature: LightFeatures) -> Result<(), LightError> {
        if self.features.contains(feature) {
            Ok(())
        } else {
            Err(LightError::FeatureDisabled(feature))
        }
    }

    /// Check that the entity can derive every one of its topics.
    ///
    /// Nothing is published or subscribed for an entity that fails this
    /// check, so a truncated topic never reaches the broker.
    pub fn validate(&self) -> Result<(), LightError> {
        if !self.has_unique_id() {
            return Err(LightError::MissingUniqueId);
        }
        self.data_topic(TopicSuffix::LONGEST)?;
        self.config_topic()?;
        Ok(())
    }

    /// Data topic of this entity.
    pub fn data_topic(&self, suffix: TopicSuffix) -> Result<String<MAX_TOPIC_LEN>, LightError> {
        topic::data_topic(&self.config, self.device.id, self.unique_id, suffix)
            .ok_or(LightError::TopicTooLong)
    }

    /// Discovery config topic of this entity.
    pub fn config_topic(&self) -> Result<String<MAX_TOPIC_LEN>, LightError> {
        topic::config_topic(&self.config, LIGHT_COMPONENT, self.device.id, self.unique_id)
            .ok_or(LightError::TopicTooLong)
    }

    /// Availability topic announced in discovery, if any.
    ///
    /// A device with shared availability takes precedence over the entity.
    pub fn availability_topic(&self) -> Result<Option<String<MAX_TOPIC_LEN>>, LightError> {
        if self.device.shared_availability {
            self.device.availability_topic(&self.config).map(Some)
        } else if self.availability {
            self.data_topic(TopicSuffix::Availability).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Check whether `topic` is this entity's `suffix` topic.
    pub fn is_topic(&self, topic: &str, suffix: TopicSuffix) -> bool {
        topic::is_data_topic(topic, &self.config, self.device.id, self.unique_id, suffix)
    }

    /// Command topics to subscribe to: primary first, then per feature.
    pub fn command_suffixes(&self) -> impl Iterator<Item = TopicSuffix> + '_ {
        [
            (LightFeatures::NONE, TopicSuffix::Command),
            (LightFeatures::BRIGHTNESS, TopicSuffix::BrightnessCommand),
            (LightFeatures::COLOR_TEMPERATURE, TopicSuffix::ColorTemperatureCommand),
            (LightFeatures::RGB, TopicSuffix::RgbCommand),
            (LightFeatures::RGBW, TopicSuffix::RgbwCommand),
        ]
        .into_iter()
        .filter(|(feature, _)| self.features.contains(*feature))
        .map(|(_, suffix)| suffix)
    }

    /// Build the discovery payload.
    ///
    /// Fails for an entity that does not pass [`validate`](Self::validate).
    pub fn discovery(&self) -> Result<LightDiscovery<'a>, LightError> {
        self.validate()?;

        let mut payload = LightDiscovery::new();
        payload.set_optional(keys::NAME, self.name);
        payload.set(keys::UNIQUE_ID, PropertyValue::Str(self.unique_id));
        payload.set_optional(keys::ICON, self.icon);
        payload.set_flag(keys::RETAIN, self.retain);
        payload.set_flag(keys::OPTIMISTIC, self.optimistic);

        if self.features.contains(LightFeatures::BRIGHTNESS) {
            self.declare_topic(&mut payload, TopicSuffix::BrightnessState)?;
            self.declare_topic(&mut payload, TopicSuffix::BrightnessCommand)?;
            payload.set_number(keys::BRIGHTNESS_SCALE, self.brightness_scale.map(u16::from));
        }

        if self.features.contains(LightFeatures::COLOR_TEMPERATURE) {
            self.declare_topic(&mut payload, TopicSuffix::ColorTemperatureState)?;
            self.declare_topic(&mut payload, TopicSuffix::ColorTemperatureCommand)?;
            payload.set_number(keys::MIN_MIREDS, self.min_mireds);
            payload.set_number(keys::MAX_MIREDS, self.max_mireds);
        }

        if self.features.contains(LightFeatures::RGB) {
            self.declare_topic(&mut payload, TopicSuffix::RgbCommand)?;
            self.declare_topic(&mut payload, TopicSuffix::RgbState)?;
        }

        if self.features.contains(LightFeatures::RGBW) {
            self.declare_topic(&mut payload, TopicSuffix::RgbwCommand)?;
            self.declare_topic(&mut payload, TopicSuffix::RgbwState)?;
        }

        payload.set(keys::DEVICE, PropertyValue::Device(self.device.info()));
        if let Some(topic) = self.availability_topic()? {
            payload.topic(TopicSuffix::Availability, topic);
        }
        self.declare_topic(&mut payload, TopicSuffix::State)?;
        self.declare_topic(&mut payload, TopicSuffix::Command)?;

        Ok(payload)
    }

    fn declare_topic(
        &self,
        payload: &mut LightDiscovery<'a>,
        suffix: TopicSuffix,
    ) -> Result<(), LightError> {
        payload.topic(suffix, self.data_topic(suffix)?);
        Ok(())
    }

    /// Publish the discovery payload on the config topic (retained).
    pub fn publish_config(&self, outbox: &mut dyn PublishOutbox) -> Result<(), LightError> {
        let payload = self.discovery()?;
        let mut buf = [0u8; MAX_DISCOVERY_LEN];
        let len = payload.to_slice(&mut buf)?;
        let topic = self.config_topic()?;

        publish_raw(outbox, topic.as_str(), &buf[..len])
    }

    /// Publish the entity's own availability.
    pub fn publish_availability(
        &self,
        outbox: &mut dyn PublishOutbox,
        online: bool,
    ) -> Result<(), LightError> {
        if !self.availability {
            return Err(LightError::AvailabilityNotConfigured);
        }
        let payload = if online {
            AVAILABILITY_ONLINE
        } else {
            AVAILABILITY_OFFLINE
        };
        self.publish_data(outbox, TopicSuffix::Availability, payload.as_bytes())
    }

    /// Publish the on/off state.
    pub fn publish_state(&self, outbox: &mut dyn PublishOutbox, state: bool) -> Result<(), LightError> {
        let payload = if state { STATE_ON } else { STATE_OFF };
        self.publish_data(outbox, TopicSuffix::State, payload.as_bytes())
    }

    /// Publish the brightness.
    pub fn publish_brightness(
        &self,
        outbox: &mut dyn PublishOutbox,
        brightness: u8,
    ) -> Result<(), LightError> {
        self.require(LightFeatures::BRIGHTNESS)?;
        let payload: String<U8_DIGITS> = Numeric::from(brightness)
            .to_str()
            .ok_or(LightError::Serialization)?;
        self.publish_data(outbox, TopicSuffix::BrightnessState, payload.as_bytes())
    }

    /// Publish the color temperature.
    pub fn publish_color_temperature(
        &self,
        outbox: &mut dyn PublishOutbox,
        temperature: u16,
    ) -> Result<(), LightError> {
        self.require(LightFeatures::COLOR_TEMPERATURE)?;
        let payload: String<U16_DIGITS> = Numeric::from(temperature)
            .to_str()
            .ok_or(LightError::Serialization)?;
        self.publish_data(outbox, TopicSuffix::ColorTemperatureState, payload.as_bytes())
    }

    /// Publish the RGB color. Unset colors are never published.
    pub fn publish_rgb_color(
        &self,
        outbox: &mut dyn PublishOutbox,
        color: Option<RgbColor>,
    ) -> Result<(), LightError> {
        self.require(LightFeatures::RGB)?;
        let color = color.ok_or(LightError::ColorUnset)?;
        self.publish_data(outbox, TopicSuffix::RgbState, color.to_payload().as_bytes())
    }

    /// Publish the RGBW color. Unset colors are never published.
    pub fn publish_rgbw_color(
        &self,
        outbox: &mut dyn PublishOutbox,
        color: Option<RgbwColor>,
    ) -> Result<(), LightError> {
        self.require(LightFeatures::RGBW)?;
        let color = color.ok_or(LightError::ColorUnset)?;
        self.publish_data(outbox, TopicSuffix::RgbwState, color.to_payload().as_bytes())
    }

    fn publish_data(
        &self,
        outbox: &mut dyn PublishOutbox,
        suffix: TopicSuffix,
        payload: &[u8],
    ) -> Result<(), LightError> {
        self.validate()?;
        let topic = self.data_topic(suffix)?;
        publish_raw(outbox, topic.as_str(), payload)
    }
}

/// All entity messages are retained.
fn publish_raw(outbox: &mut dyn PublishOutbox, topic: &str, payload: &[u8]) -> Result<(), LightError> {
    if outbox.publish(topic, payload, true) {
        Ok(())
    } else {
        #[cfg(feature = "log")]
        log::warn!("light: publish on {} was refused", topic);
        Err(LightError::PublishFailed)
    }
}
