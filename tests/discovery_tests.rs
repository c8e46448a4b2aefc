//! Integration tests for topic naming and the discovery payload.

use myrtio_ha_light::discovery::{DiscoveryPayload, MAX_DISCOVERY_LEN, PropertyValue, keys};
use myrtio_ha_light::topic::{self, MAX_TOPIC_LEN, TopicSuffix};
use myrtio_ha_light::{Device, HaConfig, LightEntity, LightError, LightFeatures};
use serde_json::Value;

static DEVICE: Device<'static> = Device::new("dev1", "Desk");

fn to_json<const N: usize>(payload: &DiscoveryPayload<'_, N>) -> Value {
    let mut buf = [0u8; MAX_DISCOVERY_LEN];
    let len = payload.to_slice(&mut buf).unwrap();
    serde_json::from_slice(&buf[..len]).unwrap()
}

// -----------------------------------------------------------------------------
// Topics
// -----------------------------------------------------------------------------

#[test]
fn data_topic_uses_default_prefix() {
    let topic: heapless::String<MAX_TOPIC_LEN> =
        topic::data_topic(&HaConfig::DEFAULT, "dev1", "lamp", TopicSuffix::RgbCommand).unwrap();

    assert_eq!(topic.as_str(), "aha/dev1/lamp/rgb_cmd_t");
}

#[test]
fn config_topic_uses_discovery_prefix() {
    let config = HaConfig::DEFAULT.with_discovery_prefix("ha");
    let topic: heapless::String<MAX_TOPIC_LEN> =
        topic::config_topic(&config, topic::LIGHT_COMPONENT, "dev1", "lamp").unwrap();

    assert_eq!(topic.as_str(), "ha/light/dev1/lamp/config");
}

#[test]
fn device_topic_has_no_entity_segment() {
    let config = HaConfig::new("homeassistant", "home");
    let topic: heapless::String<MAX_TOPIC_LEN> =
        topic::device_topic(&config, "dev1", TopicSuffix::Availability).unwrap();

    assert_eq!(topic.as_str(), "home/dev1/avty_t");
}

#[test]
fn topic_builders_refuse_to_truncate() {
    let device_id = "d".repeat(70);
    let unique_id = "u".repeat(60);

    let data: Option<heapless::String<MAX_TOPIC_LEN>> =
        topic::data_topic(&HaConfig::DEFAULT, &device_id, &unique_id, TopicSuffix::State);
    let config: Option<heapless::String<MAX_TOPIC_LEN>> =
        topic::config_topic(&HaConfig::DEFAULT, topic::LIGHT_COMPONENT, &device_id, &unique_id);
    let device: Option<heapless::String<16>> =
        topic::device_topic(&HaConfig::DEFAULT, &device_id, TopicSuffix::Availability);

    assert!(data.is_none());
    assert!(config.is_none());
    assert!(device.is_none());
}

#[test]
fn topic_matching_is_exact() {
    let config = HaConfig::DEFAULT;
    let matches = |t: &str| topic::is_data_topic(t, &config, "dev1", "lamp", TopicSuffix::Command);

    assert!(matches("aha/dev1/lamp/cmd_t"));
    assert!(!matches("aha/dev1/lamp/bri_cmd_t"));
    assert!(!matches("aha/dev1/lamp2/cmd_t"));
    assert!(!matches("aha/dev1/lamp/cmd_t/x"));
    assert!(!matches("ahb/dev1/lamp/cmd_t"));
    assert!(!matches("aha/dev1/cmd_t"));
}

// -----------------------------------------------------------------------------
// Property bag
// -----------------------------------------------------------------------------

#[test]
fn payload_keeps_declaration_order() {
    let mut payload = DiscoveryPayload::<4>::new();
    payload.set(keys::UNIQUE_ID, PropertyValue::Str("lamp"));
    payload.set(keys::NAME, PropertyValue::Str("Lamp"));
    payload.set(keys::RETAIN, PropertyValue::Bool(true));

    let mut buf = [0u8; 128];
    let len = payload.to_slice(&mut buf).unwrap();

    assert_eq!(
        core::str::from_utf8(&buf[..len]).unwrap(),
        r#"{"uniq_id":"lamp","name":"Lamp","ret":true}"#
    );
}

#[test]
fn payload_rejects_properties_beyond_capacity() {
    let mut payload = DiscoveryPayload::<1>::new();

    assert!(payload.set(keys::UNIQUE_ID, PropertyValue::Str("lamp")));
    assert!(!payload.set(keys::NAME, PropertyValue::Str("Lamp")));
    assert_eq!(payload.len(), 1);
}

#[test]
fn optional_properties_are_omitted() {
    let mut payload = DiscoveryPayload::<4>::new();
    payload.set_optional(keys::ICON, None);
    payload.set_number(keys::MIN_MIREDS, None);
    payload.set_flag(keys::OPTIMISTIC, false);

    assert!(payload.is_empty());
}

#[test]
fn payload_fails_when_buffer_too_small() {
    let mut payload = DiscoveryPayload::<2>::new();
    payload.set(keys::NAME, PropertyValue::Str("A rather long light name"));

    let mut buf = [0u8; 8];
    assert!(payload.to_slice(&mut buf).is_err());
}

// -----------------------------------------------------------------------------
// Light discovery
// -----------------------------------------------------------------------------

#[test]
fn on_off_light_declares_primary_topics_only() {
    let entity = LightEntity::new("lamp", LightFeatures::NONE, &DEVICE);
    let payload = entity.discovery().unwrap();

    let keys: Vec<_> = payload.keys().collect();
    assert_eq!(keys, ["uniq_id", "dev", "stat_t", "cmd_t"]);

    let json = to_json(&payload);
    assert_eq!(json["uniq_id"], "lamp");
    assert_eq!(json["stat_t"], "aha/dev1/lamp/stat_t");
    assert_eq!(json["cmd_t"], "aha/dev1/lamp/cmd_t");
    assert_eq!(json["dev"]["ids"], "dev1");
    assert_eq!(json["dev"]["name"], "Desk");
    assert!(json["dev"].get("mf").is_none());
}

#[test]
fn rgb_brightness_light_declares_feature_topics() {
    let features = LightFeatures::BRIGHTNESS | LightFeatures::RGB;
    let entity = LightEntity::new("strip", features, &DEVICE);
    let payload = entity.discovery().unwrap();

    let keys: Vec<_> = payload.keys().collect();
    assert_eq!(
        keys,
        [
            "uniq_id",
            "bri_stat_t",
            "bri_cmd_t",
            "rgb_cmd_t",
            "rgb_stat_t",
            "dev",
            "stat_t",
            "cmd_t",
        ]
    );

    let json = to_json(&payload);
    assert_eq!(json["bri_cmd_t"], "aha/dev1/strip/bri_cmd_t");
    assert_eq!(json["rgb_stat_t"], "aha/dev1/strip/rgb_stat_t");
    assert!(json.get("clr_temp_cmd_t").is_none());
    assert!(json.get("rgbw_cmd_t").is_none());
}

#[test]
fn full_light_declares_every_option() {
    static FULL_DEVICE: Device<'static> = Device::new("dev2", "Living room")
        .with_manufacturer("MyrtIO")
        .with_model("Strip v2")
        .with_sw_version("1.4.0");

    let features = LightFeatures::BRIGHTNESS
        | LightFeatures::COLOR_TEMPERATURE
        | LightFeatures::RGB
        | LightFeatures::RGBW;
    let entity = LightEntity::new("main", features, &FULL_DEVICE)
        .with_name("Main light")
        .with_icon("mdi:lightbulb")
        .with_retain(true)
        .with_optimistic(true)
        .with_availability(true)
        .with_brightness_scale(100)
        .with_mireds_range(153, 500);
    let payload = entity.discovery().unwrap();

    let keys: Vec<_> = payload.keys().collect();
    assert_eq!(
        keys,
        [
            "name",
            "uniq_id",
            "ic",
            "ret",
            "opt",
            "bri_stat_t",
            "bri_cmd_t",
            "bri_scl",
            "clr_temp_stat_t",
            "clr_temp_cmd_t",
            "min_mirs",
            "max_mirs",
            "rgb_cmd_t",
            "rgb_stat_t",
            "rgbw_cmd_t",
            "rgbw_stat_t",
            "dev",
            "avty_t",
            "stat_t",
            "cmd_t",
        ]
    );

    let json = to_json(&payload);
    assert_eq!(json["ret"], true);
    assert_eq!(json["opt"], true);
    assert_eq!(json["bri_scl"], 100);
    assert_eq!(json["min_mirs"], 153);
    assert_eq!(json["max_mirs"], 500);
    assert_eq!(json["avty_t"], "aha/dev2/main/avty_t");
    assert_eq!(json["dev"]["mf"], "MyrtIO");
    assert_eq!(json["dev"]["mdl"], "Strip v2");
    assert_eq!(json["dev"]["sw"], "1.4.0");
}

#[test]
fn shared_availability_points_at_device_topic() {
    static SHARED_DEVICE: Device<'static> =
        Device::new("dev3", "Hall").with_shared_availability(true);

    let entity = LightEntity::new("hall", LightFeatures::NONE, &SHARED_DEVICE);
    let json = to_json(&entity.discovery().unwrap());

    assert_eq!(json["avty_t"], "aha/dev3/avty_t");
}

#[test]
fn custom_prefixes_flow_into_topics() {
    let config = HaConfig::new("hass", "myrtio");
    let entity = LightEntity::new("lamp", LightFeatures::NONE, &DEVICE).with_config(config);

    assert_eq!(entity.config_topic().unwrap().as_str(), "hass/light/dev1/lamp/config");
    assert_eq!(
        entity.data_topic(TopicSuffix::State).unwrap().as_str(),
        "myrtio/dev1/lamp/stat_t"
    );
}

#[test]
fn entity_without_unique_id_has_no_discovery() {
    let entity = LightEntity::new("", LightFeatures::BRIGHTNESS, &DEVICE);

    assert_eq!(entity.discovery().err(), Some(LightError::MissingUniqueId));
}

#[test]
fn oversized_ids_have_no_discovery() {
    static LONG_DEVICE: Device<'static> = Device::new(
        "device-0123456789-0123456789-0123456789-0123456789-0123456789-0123456789-abcdef",
        "Long",
    );
    let unique_id = "light-0123456789-0123456789-0123456789-0123456789-ab";
    assert!(LONG_DEVICE.id.len() + unique_id.len() > MAX_TOPIC_LEN);

    let entity = LightEntity::new(unique_id, LightFeatures::BRIGHTNESS, &LONG_DEVICE);

    assert_eq!(entity.validate(), Err(LightError::TopicTooLong));
    assert_eq!(entity.discovery().err(), Some(LightError::TopicTooLong));
    assert_eq!(
        entity.data_topic(TopicSuffix::BrightnessCommand),
        Err(LightError::TopicTooLong)
    );
}

#[test]
fn longest_topic_that_fits_is_accepted() {
    static EDGE_DEVICE: Device<'static> = Device::new("dev1", "Edge");
    // "aha/dev1/" + id + "/clr_temp_stat_t" is exactly the topic capacity.
    let unique_id: &'static str = "x".repeat(MAX_TOPIC_LEN - 9 - 16).leak();
    let entity = LightEntity::new(unique_id, LightFeatures::COLOR_TEMPERATURE, &EDGE_DEVICE)
        .with_config(HaConfig::DEFAULT.with_discovery_prefix("ha"));

    assert_eq!(entity.validate(), Ok(()));
    assert_eq!(
        entity
            .data_topic(TopicSuffix::ColorTemperatureState)
            .unwrap()
            .len(),
        MAX_TOPIC_LEN
    );
}
