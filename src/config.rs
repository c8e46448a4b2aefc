//! Topic prefixes shared by every entity of a device.

/// Default Home Assistant discovery prefix.
pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";

/// Default prefix of state, command and availability topics.
pub const DEFAULT_DATA_PREFIX: &str = "aha";

/// MQTT namespace configuration
///
/// The discovery prefix must match the one configured in Home Assistant's MQTT
/// integration. The data prefix namespaces every state and command topic of
/// the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaConfig<'a> {
    /// Prefix of discovery config topics
    pub discovery_prefix: &'a str,
    /// Prefix of state, command and availability topics
    pub data_prefix: &'a str,
}

impl HaConfig<'static> {
    /// `homeassistant` discovery prefix, `aha` data prefix.
    pub const DEFAULT: Self = Self {
        discovery_prefix: DEFAULT_DISCOVERY_PREFIX,
        data_prefix: DEFAULT_DATA_PREFIX,
    };
}

impl<'a> HaConfig<'a> {
    pub const fn new(discovery_prefix: &'a str, data_prefix: &'a str) -> Self {
        Self {
            discovery_prefix,
            data_prefix,
        }
    }

    /// Set discovery prefix
    #[must_use]
    pub const fn with_discovery_prefix(mut self, prefix: &'a str) -> Self {
        self.discovery_prefix = prefix;
        self
    }

    /// Set data prefix
    #[must_use]
    pub const fn with_data_prefix(mut self, prefix: &'a str) -> Self {
        self.data_prefix = prefix;
        self
    }
}

impl Default for HaConfig<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}
