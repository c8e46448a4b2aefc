//! # Home Assistant MQTT Light for Embedded Systems
//!
//! `myrtio-ha-light` is a `no_std`, allocation-free implementation of a Home
//! Assistant *light* entity speaking the MQTT discovery convention. It owns
//! the entity side of the protocol and leaves the connection to whichever MQTT
//! client the firmware already runs.
//!
//! ## Core Features
//!
//! - **`no_std` & `no_alloc`:** Topics, payloads and the discovery JSON live in
//!   fixed-capacity `heapless` buffers.
//! - **Feature-gated entity:** Brightness, color temperature, RGB and RGBW are
//!   opt-in. Only enabled features get topics, subscriptions and discovery
//!   fields.
//! - **Idempotent state publishing:** Setters publish only on change (or when
//!   forced) and update their cache only after a successful publish.
//! - **Strict command decoding:** `"R,G,B"` / `"R,G,B,W"` and decimal payloads
//!   either decode completely or are dropped.
//! - **Transport agnostic:** Entities talk to the client through the
//!   object-safe traits of [`runtime`].
//!
//! ## Usage
//!
//! ```ignore
//! use myrtio_ha_light::{Device, HaLight, LightEntity, LightFeatures};
//! use myrtio_ha_light::runtime::{BufferedOutbox, Message, MqttModule, TopicRegistry};
//!
//! static DEVICE: Device<'static> = Device::new("kitchen", "Kitchen").with_model("LED strip");
//!
//! let entity = LightEntity::new(
//!     "strip",
//!     LightFeatures::BRIGHTNESS.union(LightFeatures::RGB),
//!     &DEVICE,
//! )
//! .with_name("Strip");
//!
//! let mut light = HaLight::new(entity);
//! light.on_state_command(|on, light, outbox| {
//!     let _ = light.set_state(outbox, on, false);
//! });
//!
//! // On every (re)connection
//! let mut outbox = BufferedOutbox::<8, 128, 1536>::new();
//! let mut registry = TopicRegistry::<8>::new();
//! light.on_connected(&mut outbox, &mut registry);
//! // ...publish `outbox`, subscribe to `registry`...
//!
//! // On every inbound message
//! light.on_message(&Message::new(topic, payload), &mut outbox);
//! ```

#![no_std]
pub mod color;
pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod light;
pub mod numeric;
pub mod runtime;
pub mod topic;

// Re-export key types for easier access at the crate root.
pub use color::{RgbColor, RgbwColor};
pub use config::HaConfig;
pub use device::Device;
pub use error::LightError;
pub use light::{HaLight, LightEntity, LightFeatures, LightState};
