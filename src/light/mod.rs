//! Home Assistant light entity
//!
//! [`HaLight`] combines a [`LightEntity`] configuration with the last state
//! published to Home Assistant and the user's command callbacks.
//!
//! # State publishing
//!
//! Every setter compares the new value with the cached one and only publishes
//! on change (or when forced). The cache is updated after the outbox accepted
//! the message, never before.
//!
//! # Commands
//!
//! Inbound payloads are decoded strictly. A command reaches its callback only
//! when it decodes and a callback is registered; anything else is dropped.
//! Callbacks get the light and the outbox, so they can confirm the new state:
//!
//! ```ignore
//! fn on_brightness(brightness: u8, light: &mut HaLight<'_>, outbox: &mut dyn PublishOutbox) {
//!     driver().set_brightness(brightness);
//!     let _ = light.set_brightness(outbox, brightness, false);
//! }
//! ```

pub mod entity;
pub mod features;
pub mod state;

pub use entity::{LIGHT_MAX_PROPERTIES, LightDiscovery, LightEntity};
pub use features::LightFeatures;
pub use state::LightState;

use crate::{
    color::{RgbColor, RgbwColor},
    error::LightError,
    numeric::Numeric,
    runtime::{Message, MqttModule, PublishOutbox, TopicCollector},
    topic::{STATE_OFF, STATE_ON, TopicSuffix},
};
use state::write_through;

/// Called with the requested on/off state
pub type StateCallback = fn(bool, &mut HaLight<'_>, &mut dyn PublishOutbox);
/// Called with the requested brightness
pub type BrightnessCallback = fn(u8, &mut HaLight<'_>, &mut dyn PublishOutbox);
/// Called with the requested color temperature in mireds
pub type ColorTemperatureCallback = fn(u16, &mut HaLight<'_>, &mut dyn PublishOutbox);
/// Called with the requested RGB color
pub type RgbColorCallback = fn(RgbColor, &mut HaLight<'_>, &mut dyn PublishOutbox);
/// Called with the requested RGBW color
pub type RgbwColorCallback = fn(RgbwColor, &mut HaLight<'_>, &mut dyn PublishOutbox);

#[derive(Clone, Copy, Default)]
struct LightCallbacks {
    state: Option<StateCallback>,
    brightness: Option<BrightnessCallback>,
    color_temperature: Option<ColorTemperatureCallback>,
    rgb_color: Option<RgbColorCallback>,
    rgbw_color: Option<RgbwColorCallback>,
}

/// A light entity synchronized with Home Assistant.
pub struct HaLight<'a> {
    entity: LightEntity<'a>,
    state: LightState,
    online: bool,
    callbacks: LightCallbacks,
}

impl<'a> HaLight<'a> {
    /// Create a light that is off, online and has no callbacks.
    pub fn new(entity: LightEntity<'a>) -> Self {
        Self {
            entity,
            state: LightState::new(),
            online: true,
            callbacks: LightCallbacks::default(),
        }
    }

    pub fn entity(&self) -> &LightEntity<'a> {
        &self.entity
    }

    pub fn features(&self) -> LightFeatures {
        self.entity.features
    }

    /// Last state published (or seeded with `set_current_*`).
    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on
    }

    pub fn brightness(&self) -> u8 {
        self.state.brightness
    }

    pub fn color_temperature(&self) -> u16 {
        self.state.color_temperature
    }

    pub fn rgb_color(&self) -> Option<RgbColor> {
        self.state.rgb
    }

    pub fn rgbw_color(&self) -> Option<RgbwColor> {
        self.state.rgbw
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    // --- Callback registration ---

    /// Register the handler of on/off commands.
    pub fn on_state_command(&mut self, callback: StateCallback) {
        self.callbacks.state = Some(callback);
    }

    /// Register the handler of brightness commands.
    pub fn on_brightness_command(&mut self, callback: BrightnessCallback) {
        self.callbacks.brightness = Some(callback);
    }

    /// Register the handler of color temperature commands.
    pub fn on_color_temperature_command(&mut self, callback: ColorTemperatureCallback) {
        self.callbacks.color_temperature = Some(callback);
    }

    /// Register the handler of RGB commands.
    pub fn on_rgb_color_command(&mut self, callback: RgbColorCallback) {
        self.callbacks.rgb_color = Some(callback);
    }

    /// Register the handler of RGBW commands.
    pub fn on_rgbw_color_command(&mut self, callback: RgbwColorCallback) {
        self.callbacks.rgbw_color = Some(callback);
    }

    // --- State setters ---

    /// Publish the on/off state if it changed (or `force` is set).
    pub fn set_state(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        state: bool,
        force: bool,
    ) -> Result<(), LightError> {
        let entity = &self.entity;
        write_through(&mut self.state.is_on, state, force, |value| {
            entity.publish_state(outbox, value)
        })
    }

    pub fn turn_on(&mut self, outbox: &mut dyn PublishOutbox) -> Result<(), LightError> {
        self.set_state(outbox, true, false)
    }

    pub fn turn_off(&mut self, outbox: &mut dyn PublishOutbox) -> Result<(), LightError> {
        self.set_state(outbox, false, false)
    }

    /// Publish the brightness if it changed (or `force` is set).
    ///
    /// Fails with [`LightError::FeatureDisabled`] on a light without brightness.
    pub fn set_brightness(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        brightness: u8,
        force: bool,
    ) -> Result<(), LightError> {
        let entity = &self.entity;
        write_through(&mut self.state.brightness, brightness, force, |value| {
            entity.publish_brightness(outbox, value)
        })
    }

    /// Publish the color temperature if it changed (or `force` is set).
    pub fn set_color_temperature(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        temperature: u16,
        force: bool,
    ) -> Result<(), LightError> {
        let entity = &self.entity;
        write_through(
            &mut self.state.color_temperature,
            temperature,
            force,
            |value| entity.publish_color_temperature(outbox, value),
        )
    }

    /// Publish the RGB color if it changed (or `force` is set).
    pub fn set_rgb_color(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        color: RgbColor,
        force: bool,
    ) -> Result<(), LightError> {
        let entity = &self.entity;
        write_through(&mut self.state.rgb, Some(color), force, |value| {
            entity.publish_rgb_color(outbox, value)
        })
    }

    /// Publish the RGBW color if it changed (or `force` is set).
    pub fn set_rgbw_color(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        color: RgbwColor,
        force: bool,
    ) -> Result<(), LightError> {
        let entity = &self.entity;
        write_through(&mut self.state.rgbw, Some(color), force, |value| {
            entity.publish_rgbw_color(outbox, value)
        })
    }

    /// Publish the entity's availability and remember it.
    pub fn set_availability(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        online: bool,
    ) -> Result<(), LightError> {
        self.entity.publish_availability(outbox, online)?;
        self.online = online;
        Ok(())
    }

    // --- Cache seeding, no publish ---

    pub fn set_current_state(&mut self, state: bool) {
        self.state.is_on = state;
    }

    pub fn set_current_brightness(&mut self, brightness: u8) {
        self.state.brightness = brightness;
    }

    pub fn set_current_color_temperature(&mut self, temperature: u16) {
        self.state.color_temperature = temperature;
    }

    pub fn set_current_rgb_color(&mut self, color: Option<RgbColor>) {
        self.state.rgb = color;
    }

    pub fn set_current_rgbw_color(&mut self, color: Option<RgbwColor>) {
        self.state.rgbw = color;
    }

    // --- Connection ---

    /// Republish every cached value, ignoring the cache.
    ///
    /// Values of disabled features and unset colors are skipped.
    fn reannounce(&self, outbox: &mut dyn PublishOutbox) {
        let entity = &self.entity;
        let state = &self.state;
        let features = entity.features;

        let _ = entity.publish_state(outbox, state.is_on);
        if features.contains(LightFeatures::BRIGHTNESS) {
            let _ = entity.publish_brightness(outbox, state.brightness);
        }
        if features.contains(LightFeatures::COLOR_TEMPERATURE) {
            let _ = entity.publish_color_temperature(outbox, state.color_temperature);
        }
        if features.contains(LightFeatures::RGB) && state.rgb.is_some() {
            let _ = entity.publish_rgb_color(outbox, state.rgb);
        }
        if features.contains(LightFeatures::RGBW) && state.rgbw.is_some() {
            let _ = entity.publish_rgbw_color(outbox, state.rgbw);
        }
    }

    // --- Commands ---

    /// Which command topic, if any, `topic` is.
    fn command_for(&self, topic: &str) -> Option<TopicSuffix> {
        self.entity
            .command_suffixes()
            .find(|suffix| self.entity.is_topic(topic, *suffix))
    }

    /// `ON` and `OFF` are matched exactly; case variants and other payloads
    /// of the same length are dropped.
    fn handle_state_command(&mut self, payload: &[u8], outbox: &mut dyn PublishOutbox) {
        let Some(callback) = self.callbacks.state else {
            return;
        };

        let state = if payload == STATE_ON.as_bytes() {
            true
        } else if payload == STATE_OFF.as_bytes() {
            false
        } else {
            #[cfg(feature = "log")]
            log::debug!("light {}: ignoring state command {:?}", self.entity.unique_id, payload);
            return;
        };
        callback(state, self, outbox);
    }

    fn handle_brightness_command(&mut self, payload: &[u8], outbox: &mut dyn PublishOutbox) {
        let Some(callback) = self.callbacks.brightness else {
            return;
        };
        if let Some(brightness) = Numeric::parse_unsigned(payload).and_then(|n| n.as_u8()) {
            callback(brightness, self, outbox);
        }
    }

    fn handle_color_temperature_command(
        &mut self,
        payload: &[u8],
        outbox: &mut dyn PublishOutbox,
    ) {
        let Some(callback) = self.callbacks.color_temperature else {
            return;
        };
        if let Some(temperature) = Numeric::parse_unsigned(payload).and_then(|n| n.as_u16()) {
            callback(temperature, self, outbox);
        }
    }

    fn handle_rgb_command(&mut self, payload: &[u8], outbox: &mut dyn PublishOutbox) {
        let Some(callback) = self.callbacks.rgb_color else {
            return;
        };
        if let Some(color) = RgbColor::from_payload(payload) {
            callback(color, self, outbox);
        }
    }

    fn handle_rgbw_command(&mut self, payload: &[u8], outbox: &mut dyn PublishOutbox) {
        let Some(callback) = self.callbacks.rgbw_color else {
            return;
        };
        if let Some(color) = RgbwColor::from_payload(payload) {
            callback(color, self, outbox);
        }
    }
}

impl MqttModule for HaLight<'_> {
    fn register(&self, collector: &mut dyn TopicCollector) {
        if self.entity.validate().is_err() {
            return;
        }
        for suffix in self.entity.command_suffixes() {
            let Ok(topic) = self.entity.data_topic(suffix) else {
                continue;
            };
            if !collector.add(topic.as_str()) {
                #[cfg(feature = "log")]
                log::warn!("light: cannot subscribe to {}", topic.as_str());
            }
        }
    }

    fn on_message(&mut self, msg: &Message<'_>, outbox: &mut dyn PublishOutbox) {
        if self.entity.validate().is_err() {
            return;
        }
        let Some(command) = self.command_for(msg.topic) else {
            return;
        };

        match command {
            TopicSuffix::Command => self.handle_state_command(msg.payload, outbox),
            TopicSuffix::BrightnessCommand => self.handle_brightness_command(msg.payload, outbox),
            TopicSuffix::ColorTemperatureCommand => {
                self.handle_color_temperature_command(msg.payload, outbox)
            }
            TopicSuffix::RgbCommand => self.handle_rgb_command(msg.payload, outbox),
            TopicSuffix::RgbwCommand => self.handle_rgbw_command(msg.payload, outbox),
            _ => {}
        }
    }

    fn on_start(&mut self, outbox: &mut dyn PublishOutbox) {
        if let Err(_err) = self.entity.validate() {
            #[cfg(feature = "log")]
            log::warn!("light {}: not announced: {}", self.entity.unique_id, _err);
            return;
        }

        #[cfg(feature = "log")]
        log::info!("light {}: announcing", self.entity.unique_id);

        let _ = self.entity.publish_config(outbox);
        if self.entity.availability && !self.entity.device.shared_availability {
            let _ = self.entity.publish_availability(outbox, self.online);
        }
        if !self.entity.retain {
            self.reannounce(outbox);
        }
    }
}
