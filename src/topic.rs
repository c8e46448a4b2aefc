//! Topic generation and matching
//!
//! Every entity derives its topics from the device id and its own unique id:
//!
//! - data topic: `{data_prefix}/{device_id}/{unique_id}/{suffix}`
//! - device topic: `{data_prefix}/{device_id}/{suffix}`
//! - config topic: `{discovery_prefix}/{component}/{device_id}/{unique_id}/config`
//!
//! The suffixes double as the abbreviated discovery keys that announce them.

use core::fmt::Write;
use heapless::String;

use crate::config::HaConfig;

/// Maximum length for a topic string
pub const MAX_TOPIC_LEN: usize = 128;

/// Discovery component of light entities
pub const LIGHT_COMPONENT: &str = "light";

/// Payload of an "on" state or command
pub const STATE_ON: &str = "ON";
/// Payload of an "off" state or command
pub const STATE_OFF: &str = "OFF";
/// Payload of an online availability
pub const AVAILABILITY_ONLINE: &str = "online";
/// Payload of an offline availability
pub const AVAILABILITY_OFFLINE: &str = "offline";

/// Last segment of a data topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicSuffix {
    State,
    Command,
    BrightnessState,
    BrightnessCommand,
    ColorTemperatureState,
    ColorTemperatureCommand,
    RgbState,
    RgbCommand,
    RgbwState,
    RgbwCommand,
    Availability,
}

impl TopicSuffix {
    /// Suffix with the longest name. An entity whose topic for it fits has
    /// room for all of its topics.
    pub const LONGEST: Self = TopicSuffix::ColorTemperatureState;

    pub const fn as_str(&self) -> &'static str {
        match self {
            TopicSuffix::State => "stat_t",
            TopicSuffix::Command => "cmd_t",
            TopicSuffix::BrightnessState => "bri_stat_t",
            TopicSuffix::BrightnessCommand => "bri_cmd_t",
            TopicSuffix::ColorTemperatureState => "clr_temp_stat_t",
            TopicSuffix::ColorTemperatureCommand => "clr_temp_cmd_t",
            TopicSuffix::RgbState => "rgb_stat_t",
            TopicSuffix::RgbCommand => "rgb_cmd_t",
            TopicSuffix::RgbwState => "rgbw_stat_t",
            TopicSuffix::RgbwCommand => "rgbw_cmd_t",
            TopicSuffix::Availability => "avty_t",
        }
    }
}

/// Generate an entity data topic
///
/// Format: `{data_prefix}/{device_id}/{unique_id}/{suffix}`
///
/// Returns `None` if the topic does not fit in `N` bytes.
pub fn data_topic<const N: usize>(
    config: &HaConfig<'_>,
    device_id: &str,
    unique_id: &str,
    suffix: TopicSuffix,
) -> Option<String<N>> {
    let mut topic = String::new();
    write!(
        topic,
        "{}/{}/{}/{}",
        config.data_prefix,
        device_id,
        unique_id,
        suffix.as_str()
    )
    .ok()?;
    Some(topic)
}

/// Generate a device-wide data topic
///
/// Format: `{data_prefix}/{device_id}/{suffix}`
pub fn device_topic<const N: usize>(
    config: &HaConfig<'_>,
    device_id: &str,
    suffix: TopicSuffix,
) -> Option<String<N>> {
    let mut topic = String::new();
    write!(
        topic,
        "{}/{}/{}",
        config.data_prefix,
        device_id,
        suffix.as_str()
    )
    .ok()?;
    Some(topic)
}

/// Generate a Home Assistant discovery config topic
///
/// Format: `{discovery_prefix}/{component}/{device_id}/{unique_id}/config`
pub fn config_topic<const N: usize>(
    config: &HaConfig<'_>,
    component: &str,
    device_id: &str,
    unique_id: &str,
) -> Option<String<N>> {
    let mut topic = String::new();
    write!(
        topic,
        "{}/{}/{}/{}/config",
        config.discovery_prefix, component, device_id, unique_id
    )
    .ok()?;
    Some(topic)
}

/// Check whether `topic` is the data topic `suffix` of the given entity.
///
/// Compares segment by segment, so no topic string is built.
pub fn is_data_topic(
    topic: &str,
    config: &HaConfig<'_>,
    device_id: &str,
    unique_id: &str,
    suffix: TopicSuffix,
) -> bool {
    strip_segment(topic, config.data_prefix)
        .and_then(|rest| strip_segment(rest, device_id))
        .and_then(|rest| strip_segment(rest, unique_id))
        .is_some_and(|rest| rest == suffix.as_str())
}

fn strip_segment<'t>(topic: &'t str, segment: &str) -> Option<&'t str> {
    topic.strip_prefix(segment)?.strip_prefix('/')
}
